//! Filter set parsing
//!
//! Parses JSON filter set documents into [`FilterSet`] values with limits and
//! optional validation against a form's field catalog.

use crate::error::FilterError;
use crate::fields::FieldCatalog;

use super::builder::validate_filter;
use super::types::FilterSet;

/// Maximum size of filter JSON in bytes (64KB)
pub const MAX_FILTER_JSON_SIZE: usize = 64 * 1024;

/// Maximum number of predicates allowed in one set
pub const MAX_PREDICATES: usize = 50;

/// Parse a filter set from JSON.
///
/// When a catalog is given, every predicate must name a known field and pass
/// [`validate_filter`] against that field's numeric flag.
pub fn parse_filter_set(json_str: &str, catalog: Option<&FieldCatalog>) -> Result<FilterSet, FilterError> {
    if json_str.len() > MAX_FILTER_JSON_SIZE {
        return Err(FilterError::TooLarge {
            max: MAX_FILTER_JSON_SIZE,
        });
    }

    let set: FilterSet =
        serde_json::from_str(json_str).map_err(|e| FilterError::InvalidJson(e.to_string()))?;

    if set.predicates.len() > MAX_PREDICATES {
        return Err(FilterError::TooManyPredicates {
            max: MAX_PREDICATES,
            count: set.predicates.len(),
        });
    }

    if let Some(catalog) = catalog {
        validate_set(&set, catalog)?;
    }

    tracing::debug!(
        join = %set.join,
        case_sensitive = set.case_sensitive,
        predicates = set.predicates.len(),
        validated = catalog.is_some(),
        "Parsed filter set"
    );
    Ok(set)
}

/// Validate every predicate of a set against a field catalog
pub fn validate_set(set: &FilterSet, catalog: &FieldCatalog) -> Result<(), FilterError> {
    for predicate in &set.predicates {
        let field_is_numeric = catalog.require_numeric(&predicate.field)?;
        validate_filter(
            predicate.condition,
            &predicate.field,
            field_is_numeric,
            &predicate.value,
        )?;
    }
    Ok(())
}
