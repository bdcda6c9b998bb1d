//! Raw tabular values as handed over by the CSV reader.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// A single scalar cell after type inference.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Whether the cell carries a usable value.
    ///
    /// Text made only of whitespace counts as empty.
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Text(s) => !s.trim().is_empty(),
        }
    }

    /// Text form used for grouping keys and date parsing.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Number(n) => {
                // 5.0 prints as "5" so numeric categories group like their text form
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// One parsed CSV row: column name to value, in header order.
///
/// A column that is missing from the row (short row) is absent, which is
/// different from a column holding [`CellValue::Null`] (empty cell).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a column, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: CellValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, CellValue)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl IntoIterator for RawRow {
    type Item = (String, CellValue);
    type IntoIter = std::vec::IntoIter<(String, CellValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Serialize for RawRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_numbers_display_without_fraction() {
        assert_eq!(CellValue::Number(5.0).to_string(), "5");
        assert_eq!(CellValue::Number(-12.0).to_string(), "-12");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Null.to_string(), "");
    }

    #[test]
    fn test_presence() {
        assert!(!CellValue::Null.is_present());
        assert!(!CellValue::Text("   ".into()).is_present());
        assert!(!CellValue::Number(0.0).is_present());
        assert!(!CellValue::Bool(false).is_present());
        assert!(CellValue::Text("Hosting".into()).is_present());
        assert!(CellValue::Number(3.0).is_present());
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut row = RawRow::new().with("id", "1").with("amount", "2");
        row.insert("id", CellValue::Text("9".into()));
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("id"), Some(&CellValue::Text("9".into())));
    }

    #[test]
    fn test_absent_differs_from_null() {
        let mut row = RawRow::new();
        row.insert("amount", CellValue::Null);
        assert!(row.contains_key("amount"));
        assert!(!row.contains_key("id"));
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let mut row = RawRow::new().with("id", "a1").with("amount", 4.5);
        row.insert("note", CellValue::Null);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"id":"a1","amount":4.5,"note":null}"#);
    }
}
