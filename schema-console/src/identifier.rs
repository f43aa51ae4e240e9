//! Identifier allow-list
//!
//! SQL identifiers cannot be bound as parameters, so every table or column
//! name that ends up inside a statement string has to pass through here first.
//! The check is an allow-list (`^[A-Za-z_][A-Za-z0-9_]*$`), never an escape
//! routine.

use std::fmt;

use crate::Error;

/// Returns `true` if `identifier` matches `^[A-Za-z_][A-Za-z0-9_]*$`
pub fn validate(identifier: &str) -> bool {
    let mut characters = identifier.chars();

    match characters.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }

    characters.all(|character| character.is_ascii_alphanumeric() || character == '_')
}

/// A table or column name that has passed [`validate`]
///
/// This is the only type the SQL builders accept for interpolation, so an
/// unchecked name cannot reach a statement string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidIdentifier(String);

impl ValidIdentifier {
    /// Validate `identifier`, failing with [`Error::InvalidIdentifier`]
    pub fn parse(identifier: impl AsRef<str>) -> Result<Self, Error> {
        let identifier = identifier.as_ref();

        if validate(identifier) {
            Ok(Self(identifier.to_string()))
        } else {
            Err(Error::InvalidIdentifier(identifier.to_string()))
        }
    }

    /// The raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier wrapped in double quotes, ready for interpolation.
    ///
    /// Quoting keeps the catalog's exact casing instead of letting the
    /// database fold it.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl fmt::Display for ValidIdentifier {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl AsRef<str> for ValidIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
