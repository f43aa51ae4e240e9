//! TypeScript interface generation

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::TableColumns;
use crate::identifier::validate;
use crate::type_mapping::{map_type, TypeExpression};

/// Output of [`render_typescript`] plus the number of tables it covers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTypes {
    pub types: String,
    pub table_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceField {
    pub name: String,
    pub type_expression: TypeExpression,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScriptInterface {
    pub interface_name: String,
    pub fields: Vec<InterfaceField>,
}

impl TypeScriptInterface {
    pub fn from_table(table: &TableColumns) -> Self {
        let fields = table
            .columns
            .iter()
            .map(|column| InterfaceField {
                name: column.name.clone(),
                type_expression: map_type(&column.native_type, &column.element_type),
                nullable: column.nullable,
            })
            .collect();

        Self {
            interface_name: to_pascal_case(&table.table),
            fields,
        }
    }

    fn render(&self, lines: &mut Vec<String>) {
        lines.push(format!("export interface {} {{", self.interface_name));

        for field in &self.fields {
            let nullable = if field.nullable { " | null" } else { "" };
            lines.push(format!(
                "  {}: {}{};",
                property_name(&field.name),
                field.type_expression,
                nullable
            ));
        }

        lines.push("}".to_string());
        lines.push(String::new());
    }
}

/// Column names that are not plain identifiers become quoted properties
fn property_name(name: &str) -> String {
    if validate(name) {
        name.to_string()
    } else {
        serde_json::Value::from(name).to_string()
    }
}

/// `order_items` → `OrderItems`; any non-alphanumeric character separates
/// words, so `order-items` and `order items` give the same name
pub fn to_pascal_case(name: &str) -> String {
    name.split(|character: char| !character.is_alphanumeric())
        .map(|word| {
            let mut characters = word.chars();
            match characters.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(characters.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Render one interface per table
pub fn render_typescript(tables: &[TableColumns], generated_at: DateTime<Utc>) -> GeneratedTypes {
    if tables.is_empty() {
        return GeneratedTypes {
            types: "// No tables found in public schema".to_string(),
            table_count: 0,
        };
    }

    let mut lines = vec![
        "// Auto-generated TypeScript types from PostgreSQL schema".to_string(),
        format!(
            "// Generated at: {}",
            generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
        String::new(),
    ];

    for table in tables {
        TypeScriptInterface::from_table(table).render(&mut lines);
    }

    GeneratedTypes {
        types: lines.join("\n"),
        table_count: tables.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnDescriptor;
    use chrono::TimeZone;

    fn column(name: &str, native_type: &str, element_type: &str, nullable: bool) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.to_string(),
            native_type: native_type.to_string(),
            element_type: element_type.to_string(),
            nullable,
            default_value: None,
        }
    }

    #[test]
    fn pascal_case_lowercases_the_rest_of_each_word() {
        assert_eq!(to_pascal_case("orders"), "Orders");
        assert_eq!(to_pascal_case("order_items"), "OrderItems");
        assert_eq!(to_pascal_case("AUDIT_LOG"), "AuditLog");
        assert_eq!(to_pascal_case("_internal"), "Internal");
        assert_eq!(to_pascal_case("order-items"), "OrderItems");
        assert_eq!(to_pascal_case("odd name"), "OddName");
    }

    #[test]
    fn irregular_column_names_are_quoted() {
        let tables = vec![TableColumns {
            table: "order-items".to_string(),
            columns: vec![
                column("id", "integer", "int4", false),
                column("unit price", "numeric", "numeric", true),
            ],
        }];

        let generated = render_typescript(&tables, Utc::now());

        assert!(generated.types.contains(
            "export interface OrderItems {\n  id: number;\n  \"unit price\": number | null;\n}"
        ));
    }

    #[test]
    fn no_tables_renders_a_placeholder() {
        let generated = render_typescript(&[], Utc::now());
        assert_eq!(generated.types, "// No tables found in public schema");
        assert_eq!(generated.table_count, 0);
    }

    #[test]
    fn renders_interfaces_with_nullable_unions() {
        let tables = vec![TableColumns {
            table: "order_items".to_string(),
            columns: vec![
                column("id", "integer", "int4", false),
                column("tags", "ARRAY", "_text", true),
                column("status", "USER-DEFINED", "order_status", false),
                column("placed_at", "timestamp with time zone", "timestamptz", true),
            ],
        }];
        let generated_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let generated = render_typescript(&tables, generated_at);

        assert_eq!(generated.table_count, 1);
        assert_eq!(
            generated.types,
            [
                "// Auto-generated TypeScript types from PostgreSQL schema",
                "// Generated at: 2024-01-02T03:04:05.000Z",
                "",
                "export interface OrderItems {",
                "  id: number;",
                "  tags: string[] | null;",
                "  status: string;",
                "  placed_at: Date | null;",
                "}",
                "",
            ]
            .join("\n")
        );
    }

    #[test]
    fn unknown_types_do_not_abort_generation() {
        let interface = TypeScriptInterface::from_table(&TableColumns {
            table: "documents".to_string(),
            columns: vec![column("search", "tsvector", "tsvector", false)],
        });

        assert_eq!(interface.interface_name, "Documents");
        assert_eq!(interface.fields[0].type_expression, TypeExpression::Unknown);
    }
}
