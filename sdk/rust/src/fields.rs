//! Form field catalog
//!
//! Field rows come from the `/field` endpoint. The filter validator only needs
//! to know whether a field holds numbers, looked up by field name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// A field row of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default)]
    pub is_num: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, is_num: bool) -> Self {
        Self {
            id: None,
            form_id: None,
            name: name.into(),
            field_type: None,
            is_num,
        }
    }
}

/// Field name to numeric flag lookup
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    numeric: HashMap<String, bool>,
}

impl FieldCatalog {
    /// Build a catalog from field rows. A later duplicate name wins.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        let numeric = fields.into_iter().map(|f| (f.name, f.is_num)).collect();
        Self { numeric }
    }

    /// Parse a JSON array of field rows
    pub fn from_json(json_str: &str) -> Result<Self, FilterError> {
        let fields: Vec<Field> =
            serde_json::from_str(json_str).map_err(|e| FilterError::InvalidJson(e.to_string()))?;
        Ok(Self::from_fields(fields))
    }

    pub fn is_numeric(&self, name: &str) -> Option<bool> {
        self.numeric.get(name).copied()
    }

    pub fn require_numeric(&self, name: &str) -> Result<bool, FilterError> {
        self.is_numeric(name)
            .ok_or_else(|| FilterError::UnknownField(name.to_string()))
    }

    /// Field names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.numeric.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.numeric.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numeric.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_and_unknown() {
        let catalog = FieldCatalog::from_fields(vec![
            Field::new("title", false),
            Field::new("pages", true),
        ]);
        assert_eq!(catalog.is_numeric("title"), Some(false));
        assert_eq!(catalog.is_numeric("pages"), Some(true));
        assert_eq!(catalog.is_numeric("author"), None);
        assert_eq!(
            catalog.require_numeric("author"),
            Err(FilterError::UnknownField("author".to_string()))
        );
    }

    #[test]
    fn from_json_field_rows() {
        let json = r#"[
            {"id": 1, "form_id": 7, "name": "title", "field_type": "text", "is_num": false, "order_index": 0},
            {"id": 2, "form_id": 7, "name": "pages", "field_type": "text", "is_num": true}
        ]"#;
        let catalog = FieldCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names(), vec!["pages", "title"]);
        assert_eq!(catalog.is_numeric("pages"), Some(true));
    }

    #[test]
    fn from_json_missing_is_num_defaults_to_text() {
        let catalog = FieldCatalog::from_json(r#"[{"name": "notes"}]"#).unwrap();
        assert_eq!(catalog.is_numeric("notes"), Some(false));
    }

    #[test]
    fn from_json_invalid() {
        assert!(matches!(
            FieldCatalog::from_json(r#"{"name": "x"}"#),
            Err(FilterError::InvalidJson(_))
        ));
    }

    #[test]
    fn duplicate_name_last_wins() {
        let catalog = FieldCatalog::from_fields(vec![Field::new("x", false), Field::new("x", true)]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.is_numeric("x"), Some(true));
    }
}
