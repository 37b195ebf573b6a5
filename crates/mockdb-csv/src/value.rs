//! Rendering of generated values as CSV fields.

use mockdb_core::GeneratedValue;

/// Wrapper for CSV string values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvValue(pub String);

impl CsvValue {
    /// Get the inner CSV string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Get a reference to the inner CSV string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&GeneratedValue> for CsvValue {
    fn from(value: &GeneratedValue) -> Self {
        match value {
            GeneratedValue::Integer(i) => CsvValue(i.to_string()),
            // Shortest representation that parses back to the same f64
            GeneratedValue::Real(f) => CsvValue(f.to_string()),
            GeneratedValue::Date(_) => CsvValue(value.to_string()),
            GeneratedValue::String(s) => CsvValue(s.clone()),
        }
    }
}

impl From<GeneratedValue> for CsvValue {
    fn from(value: GeneratedValue) -> Self {
        match value {
            GeneratedValue::String(s) => CsvValue(s),
            other => CsvValue::from(&other),
        }
    }
}

impl AsRef<[u8]> for CsvValue {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_numbers() {
        assert_eq!(CsvValue::from(GeneratedValue::Integer(-42)).as_str(), "-42");
        assert_eq!(CsvValue::from(GeneratedValue::Real(0.1)).as_str(), "0.1");
        assert_eq!(CsvValue::from(GeneratedValue::Real(2.0)).as_str(), "2");
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(13, 5, 9)
            .unwrap();
        assert_eq!(
            CsvValue::from(GeneratedValue::Date(date)).into_inner(),
            "2024-02-29 13:05:09"
        );

        let precise = NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_micro_opt(0, 0, 1, 250_000)
            .unwrap();
        assert!(CsvValue::from(GeneratedValue::Date(precise))
            .as_str()
            .starts_with("1970-01-01 00:00:01.25"));
    }

    #[test]
    fn test_strings_verbatim() {
        let value = GeneratedValue::String("a,\"b\"".to_string());
        assert_eq!(CsvValue::from(&value).as_str(), "a,\"b\"");
    }
}
