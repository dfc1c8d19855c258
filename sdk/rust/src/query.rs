//! Record query composition

use crate::filters::FilterSet;

/// Default PostgREST endpoint for records
pub const RECORD_ENDPOINT: &str = "/record";

/// Default PostgREST endpoint for fields
pub const FIELD_ENDPOINT: &str = "/field";

/// Records of one form, optionally narrowed by a compiled filter set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    pub form_id: i64,
    pub filter: String,
}

impl RecordQuery {
    pub fn new(form_id: i64) -> Self {
        Self {
            form_id,
            filter: String::new(),
        }
    }

    pub fn with_filters(mut self, set: &FilterSet) -> Self {
        self.filter = set.compile();
        self
    }

    /// `{endpoint}?form_id=eq.{id}`, followed by `&{filter}` when a filter is set
    pub fn path(&self, endpoint: &str) -> String {
        let mut path = format!("{}?form_id=eq.{}", endpoint, self.form_id);
        if !self.filter.is_empty() {
            path.push('&');
            path.push_str(&self.filter);
        }
        path
    }

    pub fn url(&self, base_url: &str, endpoint: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path(endpoint))
    }
}

/// Path listing the fields of a form
pub fn form_fields_path(endpoint: &str, form_id: i64) -> String {
    format!("{}?form_id=eq.{}", endpoint, form_id)
}
