//! CSV and JSON encoding of exported rows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::Row;

/// Hard ceiling on exported rows
pub const MAX_EXPORT_ROWS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// An encoded export, ready to be offered as a download
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub content: String,
    pub row_count: u64,
    pub filename: String,

    /// More rows existed than the export row limit allowed
    pub truncated: bool,
}

/// `<table>_<YYYY-MM-DDTHH-MM-SS>.<extension>`, safe on every filesystem
pub fn export_filename(table: &str, format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "{}_{}.{}",
        table,
        at.format("%Y-%m-%dT%H-%M-%S"),
        format.extension()
    )
}

/// Encode rows in the given format
pub fn encode(rows: &[Row], format: ExportFormat) -> Result<String, serde_json::Error> {
    match format {
        ExportFormat::Csv => Ok(encode_csv(rows)),
        ExportFormat::Json => encode_json(rows),
    }
}

/// Encode rows as CSV. The header is taken from the first row; an empty
/// row set encodes to the empty string.
pub fn encode_csv(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };

    let headers: Vec<&String> = first.keys().collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|header| escape_csv_text(header))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in rows {
        let line = headers
            .iter()
            .map(|header| row.get(header.as_str()).map(escape_csv).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    lines.join("\n")
}

/// Encode rows as a pretty-printed JSON array
pub fn encode_json(rows: &[Row]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}

/// Render a single cell. Nulls become empty; objects and arrays become
/// their compact JSON text before escaping.
pub fn escape_csv(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => escape_csv_text(text),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => escape_csv_text(&value.to_string()),
    }
}

fn escape_csv_text(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn rows(values: Value) -> Vec<Row> {
        values
            .as_array()
            .unwrap()
            .iter()
            .map(|value| value.as_object().unwrap().clone())
            .collect()
    }

    /// Split CSV text into records, honouring quoted fields
    fn parse_csv(content: &str) -> Vec<Vec<String>> {
        let mut records = Vec::new();
        let mut record = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut characters = content.chars().peekable();

        while let Some(character) = characters.next() {
            match (character, in_quotes) {
                ('"', true) if characters.peek() == Some(&'"') => {
                    characters.next();
                    field.push('"');
                }
                ('"', true) => in_quotes = false,
                ('"', false) => in_quotes = true,
                (',', false) => record.push(std::mem::take(&mut field)),
                ('\n', false) => {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                (other, _) => field.push(other),
            }
        }
        record.push(field);
        records.push(record);

        records
    }

    #[test]
    fn empty_row_set_encodes_to_empty_csv() {
        assert_eq!(encode_csv(&[]), "");
    }

    #[test]
    fn header_follows_first_row_column_order() {
        let content = encode_csv(&rows(json!([
            {"id": 1, "name": "Ada", "active": true},
            {"id": 2, "name": "Grace", "active": false}
        ])));

        assert_eq!(content, "id,name,active\n1,Ada,true\n2,Grace,false");
    }

    #[test]
    fn special_characters_are_quoted() {
        assert_eq!(escape_csv(&json!("plain")), "plain");
        assert_eq!(escape_csv(&json!("a,b")), "\"a,b\"");
        assert_eq!(escape_csv(&json!("say \"hi\"")), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv(&json!("two\nlines")), "\"two\nlines\"");
    }

    #[test]
    fn nulls_are_empty_and_objects_are_json_text() {
        assert_eq!(escape_csv(&Value::Null), "");
        assert_eq!(escape_csv(&json!({"a": 1})), "\"{\"\"a\"\":1}\"");
        assert_eq!(escape_csv(&json!([1, 2])), "\"[1,2]\"");
        assert_eq!(escape_csv(&json!(1.5)), "1.5");
    }

    #[test]
    fn missing_keys_in_later_rows_are_empty_cells() {
        let content = encode_csv(&rows(json!([
            {"id": 1, "note": "x"},
            {"id": 2}
        ])));

        assert_eq!(content, "id,note\n1,x\n2,");
    }

    #[test]
    fn csv_round_trips_cell_values() {
        let original = rows(json!([
            {"id": "1", "body": "hello, world", "quote": "she said \"no\"", "empty": null},
            {"id": "2", "body": "line one\nline two", "quote": "", "empty": "x"}
        ]));

        let parsed = parse_csv(&encode_csv(&original));

        assert_eq!(parsed[0], ["id", "body", "quote", "empty"]);
        for (record, row) in parsed[1..].iter().zip(&original) {
            for (cell, (_, value)) in record.iter().zip(row) {
                let expected = value.as_str().unwrap_or_default();
                assert_eq!(cell, expected);
            }
        }
        assert_eq!(parsed.len(), original.len() + 1);
    }

    #[test]
    fn json_is_pretty_printed() {
        let content = encode_json(&rows(json!([{"id": 1}]))).unwrap();
        assert_eq!(content, "[\n  {\n    \"id\": 1\n  }\n]");
        assert_eq!(encode_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn filenames_embed_table_and_safe_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();

        assert_eq!(
            export_filename("orders", ExportFormat::Csv, at),
            "orders_2024-03-09T14-05-07.csv"
        );
        assert_eq!(
            export_filename("audit_log", ExportFormat::Json, at),
            "audit_log_2024-03-09T14-05-07.json"
        );
    }
}
