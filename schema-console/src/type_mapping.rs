//! Native SQL type → TypeScript type expression
//!
//! The lookup never fails: anything it does not recognise becomes
//! [`TypeExpression::Unknown`].

use std::fmt;

/// Catalog `data_type` reported for array columns
pub const ARRAY_TYPE: &str = "ARRAY";

/// Catalog `data_type` reported for enums and other user-defined types
pub const USER_DEFINED_TYPE: &str = "USER-DEFINED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    DateTime,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectShape {
    /// `json`: structure unknown
    Untyped,
    /// `jsonb`: string-keyed record
    Record,
    /// geometric `point`
    Point,
}

/// A target-language type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpression {
    Primitive(Primitive),
    Object(ObjectShape),
    ArrayOf(Box<TypeExpression>),

    /// Enum or other user-defined type. Members are not introspected, so
    /// this renders as a plain string.
    UserDefined,

    Unknown,
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpression::Primitive(Primitive::String) => formatter.write_str("string"),
            TypeExpression::Primitive(Primitive::Number) => formatter.write_str("number"),
            TypeExpression::Primitive(Primitive::Boolean) => formatter.write_str("boolean"),
            TypeExpression::Primitive(Primitive::DateTime) => formatter.write_str("Date"),
            TypeExpression::Primitive(Primitive::Binary) => formatter.write_str("Buffer"),
            TypeExpression::Object(ObjectShape::Untyped) => formatter.write_str("unknown"),
            TypeExpression::Object(ObjectShape::Record) => {
                formatter.write_str("Record<string, unknown>")
            }
            TypeExpression::Object(ObjectShape::Point) => {
                formatter.write_str("{ x: number; y: number }")
            }
            TypeExpression::ArrayOf(element) => write!(formatter, "{element}[]"),
            TypeExpression::UserDefined => formatter.write_str("string"),
            TypeExpression::Unknown => formatter.write_str("unknown"),
        }
    }
}

/// Static lookup for scalar type names, as reported in `data_type` or
/// `udt_name`
fn lookup(native_type: &str) -> Option<TypeExpression> {
    let expression = match native_type {
        "uuid" | "text" | "varchar" | "character varying" | "char" | "character" | "bpchar"
        | "name" | "citext" => TypeExpression::Primitive(Primitive::String),

        "integer" | "int" | "int4" | "smallint" | "int2" | "bigint" | "int8" | "decimal"
        | "numeric" | "real" | "float4" | "double precision" | "float8" | "serial"
        | "bigserial" => TypeExpression::Primitive(Primitive::Number),

        "boolean" | "bool" => TypeExpression::Primitive(Primitive::Boolean),

        "timestamp" | "timestamp with time zone" | "timestamp without time zone"
        | "timestamptz" => TypeExpression::Primitive(Primitive::DateTime),

        // ISO strings on the wire
        "date" | "time" | "time with time zone" | "time without time zone" | "timetz"
        | "interval" => TypeExpression::Primitive(Primitive::String),

        "json" => TypeExpression::Object(ObjectShape::Untyped),
        "jsonb" => TypeExpression::Object(ObjectShape::Record),

        "bytea" => TypeExpression::Primitive(Primitive::Binary),

        "inet" | "cidr" | "macaddr" | "line" | "lseg" | "box" | "path" | "polygon"
        | "circle" => TypeExpression::Primitive(Primitive::String),
        "point" => TypeExpression::Object(ObjectShape::Point),

        _ => return None,
    };

    Some(expression)
}

fn lookup_normalized(native_type: &str) -> Option<TypeExpression> {
    lookup(native_type).or_else(|| lookup(&native_type.to_lowercase()))
}

/// Map a catalog column type to a type expression
///
/// # Arguments
///
/// * `native_type` - The catalog's `data_type`
/// * `element_type` - The catalog's `udt_name`; only consulted for arrays
pub fn map_type(native_type: &str, element_type: &str) -> TypeExpression {
    if native_type == USER_DEFINED_TYPE {
        return TypeExpression::UserDefined;
    }

    if native_type == ARRAY_TYPE {
        let base_type = element_type.strip_prefix('_').unwrap_or(element_type);
        let element = lookup_normalized(base_type).unwrap_or(TypeExpression::Unknown);
        return TypeExpression::ArrayOf(Box::new(element));
    }

    lookup_normalized(native_type).unwrap_or(TypeExpression::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_common_scalars() {
        assert_eq!(map_type("integer", "int4"), TypeExpression::Primitive(Primitive::Number));
        assert_eq!(map_type("text", "text"), TypeExpression::Primitive(Primitive::String));
        assert_eq!(map_type("boolean", "bool"), TypeExpression::Primitive(Primitive::Boolean));
        assert_eq!(map_type("bytea", "bytea").to_string(), "Buffer");
        assert_eq!(map_type("uuid", "uuid").to_string(), "string");
        assert_eq!(map_type("numeric", "numeric").to_string(), "number");
    }

    #[test]
    fn timestamps_map_to_date_but_dates_stay_strings() {
        assert_eq!(
            map_type("timestamp with time zone", "timestamptz"),
            TypeExpression::Primitive(Primitive::DateTime)
        );
        assert_eq!(map_type("timestamp without time zone", "timestamp").to_string(), "Date");
        assert_eq!(map_type("date", "date").to_string(), "string");
        assert_eq!(map_type("interval", "interval").to_string(), "string");
    }

    #[test]
    fn json_types_render_as_objects() {
        assert_eq!(map_type("json", "json").to_string(), "unknown");
        assert_eq!(map_type("jsonb", "jsonb").to_string(), "Record<string, unknown>");
        assert_eq!(map_type("point", "point").to_string(), "{ x: number; y: number }");
        assert_eq!(map_type("inet", "inet").to_string(), "string");
    }

    #[test]
    fn arrays_map_their_element_type() {
        let text_array = map_type("ARRAY", "_text");
        assert_eq!(
            text_array,
            TypeExpression::ArrayOf(Box::new(TypeExpression::Primitive(Primitive::String)))
        );
        assert_eq!(text_array.to_string(), "string[]");
        assert_eq!(map_type("ARRAY", "_int4").to_string(), "number[]");
        assert_eq!(map_type("ARRAY", "_my_enum").to_string(), "unknown[]");
    }

    #[test]
    fn user_defined_types_fall_back_to_string() {
        let mapped = map_type("USER-DEFINED", "order_status");
        assert_eq!(mapped, TypeExpression::UserDefined);
        assert_eq!(mapped.to_string(), "string");
    }

    #[test]
    fn lookup_falls_back_to_lowercase() {
        assert_eq!(map_type("INTEGER", "").to_string(), "number");
        assert_eq!(map_type("Text", "").to_string(), "string");
    }

    #[test]
    fn unrecognised_types_become_unknown() {
        assert_eq!(map_type("tsvector", "tsvector"), TypeExpression::Unknown);
        assert_eq!(map_type("", ""), TypeExpression::Unknown);
        assert_eq!(map_type("money", "money").to_string(), "unknown");
    }
}
