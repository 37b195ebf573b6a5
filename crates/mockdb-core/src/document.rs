//! Schema document format.
//!
//! The document is the declarative input: a list of tables, each with a row
//! count and attributes. Every field is optional at this level so that the
//! model can report missing keys with the table and attribute they belong to.
//!
//! ## Example
//!
//! ```yaml
//! tables:
//!   - name: users
//!     rows: 100
//!     primary_keys: [id]
//!     attributes:
//!       - name: id
//!         type: INTEGER
//!         generation: INCREASING
//!         start: 1
//!         step: 1
//!       - name: born
//!         type: DATE
//!         step: { days: 7 }
//!   - name: orders
//!     rows: 500
//!     attributes:
//!       - name: user_id
//!         type: FOREIGN_KEY
//!         references: { table: users, attribute: id }
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Attribute type name that marks a foreign key.
pub const FOREIGN_KEY_TYPE: &str = "FOREIGN_KEY";

/// Parsed schema document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub tables: Vec<TableDocument>,
}

impl SchemaDocument {
    /// Load a document from a file, choosing the parser from the extension.
    ///
    /// `.yaml` and `.yml` files are parsed as YAML, everything else as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);

        let document = if is_yaml {
            Self::from_yaml(&content)?
        } else {
            Self::from_json(&content)?
        };
        tracing::debug!(
            "Loaded schema document {} with {} tables",
            path.display(),
            document.tables.len()
        );
        Ok(document)
    }

    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a document from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Names of the declared tables, skipping unnamed entries.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter_map(|t| t.name.as_deref())
            .collect()
    }
}

/// One table entry of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDocument {
    pub name: Option<String>,

    /// Number of rows to generate
    pub rows: Option<Scalar>,

    pub attributes: Option<Vec<AttributeDocument>>,

    #[serde(default)]
    pub primary_keys: Vec<String>,
}

/// One attribute entry of a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeDocument {
    pub name: Option<String>,

    /// `INTEGER`, `STRING`, `REAL`, `DATE` or `FOREIGN_KEY`
    #[serde(rename = "type")]
    pub attribute_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Scalar>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<StepDocument>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<Scalar>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,

    /// `{ "table": ..., "attribute": ... }` for foreign keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<serde_json::Value>,
}

impl AttributeDocument {
    /// Whether the declared type is `FOREIGN_KEY` (case-insensitive).
    pub fn is_foreign_key(&self) -> bool {
        self.attribute_type
            .as_deref()
            .map(|t| t.trim().eq_ignore_ascii_case(FOREIGN_KEY_TYPE))
            .unwrap_or(false)
    }
}

/// A scalar written either as a number or as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Scalar {
    /// Read as an integer. Text is parsed; reals must have no fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(v) => Some(*v),
            Scalar::Real(v)
                if v.fract() == 0.0 && *v >= i64::MIN as f64 && *v < i64::MAX as f64 =>
            {
                Some(*v as i64)
            }
            Scalar::Real(_) => None,
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Read as a float. Integers are widened, text is parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(v) => Some(*v as f64),
            Scalar::Real(v) => Some(*v),
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Read as a non-negative count.
    pub fn as_usize(&self) -> Option<usize> {
        self.as_i64().and_then(|v| usize::try_from(v).ok())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(v) => write!(f, "{v}"),
            Scalar::Real(v) => write!(f, "{v}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Integer(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

/// Step of an attribute: a scalar, or a duration object for dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepDocument {
    Scalar(Scalar),
    /// Keys among `weeks`, `days`, `hours`, `minutes`, `seconds`,
    /// `milliseconds`, `microseconds`
    Duration(BTreeMap<String, Scalar>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const SAMPLE_JSON: &str = r#"{
        "tables": [
            {
                "name": "users",
                "rows": "3",
                "primary_keys": ["id"],
                "attributes": [
                    {"name": "id", "type": "INTEGER", "generation": "INCREASING", "start": "0", "step": "1"},
                    {"name": "born", "type": "DATE", "step": {"days": "2", "hours": 3}},
                    {"name": "nick", "type": "string", "length": 8}
                ]
            },
            {
                "name": "orders",
                "rows": 5,
                "attributes": [
                    {"name": "user_id", "type": "FOREIGN_KEY", "references": {"table": "users", "attribute": "id"}}
                ]
            }
        ]
    }"#;

    const SAMPLE_YAML: &str = r#"
tables:
  - name: users
    rows: 3
    attributes:
      - name: id
        type: INTEGER
        step: 2
      - name: score
        type: REAL
        start: 1.5
"#;

    #[test]
    fn test_parse_json_document() {
        let doc = SchemaDocument::from_json(SAMPLE_JSON).unwrap();
        assert_eq!(doc.table_names(), vec!["users", "orders"]);

        let users = &doc.tables[0];
        assert_eq!(users.rows.as_ref().and_then(Scalar::as_usize), Some(3));
        assert_eq!(users.primary_keys, vec!["id".to_string()]);

        let attrs = users.attributes.as_ref().unwrap();
        assert_eq!(attrs[0].start, Some(Scalar::Text("0".to_string())));
        assert_eq!(attrs[0].generation.as_deref(), Some("INCREASING"));

        match attrs[1].step.as_ref().unwrap() {
            StepDocument::Duration(parts) => {
                assert_eq!(parts["days"].as_i64(), Some(2));
                assert_eq!(parts["hours"].as_i64(), Some(3));
            }
            other => panic!("expected duration step, got {other:?}"),
        }
        assert_eq!(attrs[2].length.as_ref().and_then(Scalar::as_usize), Some(8));

        let fk = &doc.tables[1].attributes.as_ref().unwrap()[0];
        assert!(fk.is_foreign_key());
        assert!(fk.references.is_some());
        assert!(doc.tables[1].primary_keys.is_empty());
    }

    #[test]
    fn test_parse_yaml_document() {
        let doc = SchemaDocument::from_yaml(SAMPLE_YAML).unwrap();
        let attrs = doc.tables[0].attributes.as_ref().unwrap();
        assert_eq!(
            attrs[0].step,
            Some(StepDocument::Scalar(Scalar::Integer(2)))
        );
        assert_eq!(attrs[1].start.as_ref().and_then(Scalar::as_f64), Some(1.5));
    }

    #[test]
    fn test_missing_keys_are_kept_optional() {
        let doc = SchemaDocument::from_json(r#"{"tables": [{"rows": 1}]}"#).unwrap();
        assert!(doc.tables[0].name.is_none());
        assert!(doc.tables[0].attributes.is_none());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let result = SchemaDocument::from_json("{ not json");
        assert!(matches!(result, Err(crate::Error::Json(_))));
    }

    #[test]
    fn test_from_file_picks_parser_by_extension() {
        let dir = TempDir::new().unwrap();

        let yaml_path = dir.path().join("shop.yaml");
        let mut file = fs::File::create(&yaml_path).unwrap();
        file.write_all(SAMPLE_YAML.as_bytes()).unwrap();
        let doc = SchemaDocument::from_file(&yaml_path).unwrap();
        assert_eq!(doc.table_names(), vec!["users"]);

        let json_path = dir.path().join("shop.json");
        fs::write(&json_path, SAMPLE_JSON).unwrap();
        let doc = SchemaDocument::from_file(&json_path).unwrap();
        assert_eq!(doc.tables.len(), 2);

        let missing = SchemaDocument::from_file(dir.path().join("absent.json"));
        assert!(matches!(missing, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Scalar::from("  12 ").as_i64(), Some(12));
        assert_eq!(Scalar::Real(4.0).as_i64(), Some(4));
        assert_eq!(Scalar::Real(4.5).as_i64(), None);
        assert_eq!(Scalar::from("0.25").as_f64(), Some(0.25));
        assert_eq!(Scalar::from(-1).as_usize(), None);
        assert_eq!(Scalar::from("abc").as_i64(), None);
        assert_eq!(Scalar::Real(1e300).as_i64(), None);
        assert_eq!(Scalar::Real(1e20).as_usize(), None);
        assert_eq!(Scalar::Real(-1e19).as_i64(), None);
    }
}
