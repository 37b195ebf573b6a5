//! Error type shared by every mockdb crate.

use crate::types::{DbType, GenerationMode};

/// Result alias for mockdb operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for schema construction, resolution and generation.
///
/// The taxonomy variants describe what went wrong. `Attribute`, `Table` and
/// `Schema` wrap an inner error with the name of the element it occurred in,
/// so the chain of sources reads outermost to innermost.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or inconsistent document entry
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Generation mode not allowed for the column type
    #[error("generation mode {mode} is not valid for type {db_type}")]
    InvalidGenerationMode {
        db_type: DbType,
        mode: GenerationMode,
    },

    /// Foreign key naming a table or attribute that does not exist
    #[error("{}", unresolved_message(table, attribute.as_deref()))]
    UnresolvedReference {
        table: String,
        attribute: Option<String>,
    },

    /// Value or pattern of the wrong kind
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Foreign key read before its data was populated
    #[error("data for attribute '{attribute}' is not ready")]
    DataNotReady { attribute: String },

    #[error("attribute '{name}'")]
    Attribute {
        name: String,
        #[source]
        source: Box<Error>,
    },

    #[error("table '{name}'")]
    Table {
        name: String,
        #[source]
        source: Box<Error>,
    },

    #[error("schema '{name}'")]
    Schema {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// Error reading a schema document or word list
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a JSON schema document
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing a YAML schema document
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn unresolved_message(table: &str, attribute: Option<&str>) -> String {
    match attribute {
        Some(attribute) => {
            format!("unresolved reference: table '{table}' has no attribute '{attribute}'")
        }
        None => format!("unresolved reference: table '{table}' does not exist"),
    }
}

impl Error {
    /// Shorthand for `InvalidConfiguration`.
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration(message.into())
    }

    /// Wrap this error with the attribute it occurred in.
    pub fn in_attribute(self, name: impl Into<String>) -> Self {
        Error::Attribute {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// Wrap this error with the table it occurred in.
    pub fn in_table(self, name: impl Into<String>) -> Self {
        Error::Table {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// Wrap this error with the schema it occurred in.
    pub fn in_schema(self, name: impl Into<String>) -> Self {
        Error::Schema {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with every context wrapper removed.
    pub fn root(&self) -> &Error {
        let mut current = self;
        while let Error::Attribute { source, .. }
        | Error::Table { source, .. }
        | Error::Schema { source, .. } = current
        {
            current = source;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_root_unwraps_context() {
        let err = Error::DataNotReady {
            attribute: "fk".to_string(),
        }
        .in_attribute("fk")
        .in_table("orders")
        .in_schema("shop");

        assert!(matches!(err, Error::Schema { .. }));
        assert!(matches!(err.root(), Error::DataNotReady { .. }));
    }

    #[test]
    fn test_source_chain_order() {
        let err = Error::invalid("bad step")
            .in_attribute("price")
            .in_table("items");

        let mut chain = vec![err.to_string()];
        let mut source = err.source();
        while let Some(inner) = source {
            chain.push(inner.to_string());
            source = inner.source();
        }

        assert_eq!(
            chain,
            vec![
                "table 'items'".to_string(),
                "attribute 'price'".to_string(),
                "invalid configuration: bad step".to_string(),
            ]
        );
    }

    #[test]
    fn test_unresolved_reference_message() {
        let missing_table = Error::UnresolvedReference {
            table: "ghost".to_string(),
            attribute: None,
        };
        assert!(missing_table.to_string().contains("'ghost' does not exist"));

        let missing_attr = Error::UnresolvedReference {
            table: "users".to_string(),
            attribute: Some("uid".to_string()),
        };
        assert!(missing_attr.to_string().contains("no attribute 'uid'"));
    }

    #[test]
    fn test_root_of_plain_error_is_itself() {
        let err = Error::TypeMismatch {
            expected: "integer",
            found: "duration",
        };
        assert!(std::ptr::eq(err.root(), &err));
    }
}
