//! Markdown description of the schema, meant to be pasted into an assistant
//! or a design doc

use chrono::{DateTime, SecondsFormat, Utc};

use super::TableColumns;

const DEFAULT_PREVIEW_CHARACTERS: usize = 30;

fn preview_default(default_value: Option<&str>) -> String {
    match default_value {
        Some(value) if !value.is_empty() => {
            let preview: String = value.chars().take(DEFAULT_PREVIEW_CHARACTERS).collect();
            let ellipsis = if value.chars().count() > DEFAULT_PREVIEW_CHARACTERS {
                "..."
            } else {
                ""
            };
            format!("`{preview}{ellipsis}`")
        }
        _ => "-".to_string(),
    }
}

pub fn render_schema_context(tables: &[TableColumns], generated_at: DateTime<Utc>) -> String {
    let mut lines = vec![
        "# Database Schema Context".to_string(),
        String::new(),
        "> **WARNING**: This context contains database schema information.".to_string(),
        "> Do not share publicly.".to_string(),
        String::new(),
        format!(
            "Generated: {}",
            generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
        String::new(),
        "---".to_string(),
        String::new(),
        "## Database Schema".to_string(),
        String::new(),
    ];

    for table in tables {
        lines.push(format!("### Table: `{}`", table.table));
        lines.push(String::new());
        lines.push("| Column | Type | Nullable | Default |".to_string());
        lines.push("|--------|------|----------|---------|".to_string());

        for column in &table.columns {
            let nullable = if column.nullable { "✓" } else { "✗" };
            lines.push(format!(
                "| {} | {} | {} | {} |",
                column.name,
                column.native_type,
                nullable,
                preview_default(column.default_value.as_deref())
            ));
        }

        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnDescriptor;
    use chrono::TimeZone;

    #[test]
    fn long_defaults_are_cut() {
        assert_eq!(preview_default(None), "-");
        assert_eq!(preview_default(Some("now()")), "`now()`");
        assert_eq!(
            preview_default(Some("nextval('orders_id_seq'::regclass)")),
            "`nextval('orders_id_seq'::regcl...`"
        );
    }

    #[test]
    fn renders_a_section_per_table() {
        let tables = vec![TableColumns {
            table: "orders".to_string(),
            columns: vec![
                ColumnDescriptor {
                    name: "id".to_string(),
                    native_type: "integer".to_string(),
                    element_type: "int4".to_string(),
                    nullable: false,
                    default_value: Some("nextval('orders_id_seq'::regclass)".to_string()),
                },
                ColumnDescriptor {
                    name: "note".to_string(),
                    native_type: "text".to_string(),
                    element_type: "text".to_string(),
                    nullable: true,
                    default_value: None,
                },
            ],
        }];

        let markdown =
            render_schema_context(&tables, Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap());

        assert!(markdown.contains("Generated: 2024-05-06T07:08:09.000Z"));
        assert!(markdown.contains("### Table: `orders`"));
        assert!(markdown.contains("| id | integer | ✗ | `nextval('orders_id_seq'::regcl...` |"));
        assert!(markdown.contains("| note | text | ✓ | - |"));
    }
}
