//! PostgREST filter builder
//!
//! Renders predicates into PostgREST query fragments against the JSON
//! `values` column of a record and joins them under AND or OR.

use crate::error::{FilterError, RejectReason};

use super::numeric::looks_numeric;
use super::types::{FilterCondition, FilterSet, JoinMode};

/// JSON column holding the user data of a record
const VALUES_COLUMN: &str = "values";

pub fn is_string_condition(condition: FilterCondition) -> bool {
    condition.is_string_condition()
}

/// Check that condition, field type and value agree on text vs number
pub fn is_valid_filter(condition: FilterCondition, field_is_numeric: bool, value: &str) -> bool {
    rejection(condition, field_is_numeric, value).is_none()
}

/// Like [`is_valid_filter`], reporting why the predicate was rejected
pub fn validate_filter(
    condition: FilterCondition,
    field: &str,
    field_is_numeric: bool,
    value: &str,
) -> Result<(), FilterError> {
    match rejection(condition, field_is_numeric, value) {
        None => Ok(()),
        Some(reason) => {
            tracing::debug!(%condition, field, value, %reason, "Rejected filter");
            Err(FilterError::InvalidPredicate {
                condition,
                field: field.to_string(),
                reason,
            })
        }
    }
}

fn rejection(condition: FilterCondition, field_is_numeric: bool, value: &str) -> Option<RejectReason> {
    let numeric_value = looks_numeric(value);
    match (condition.is_string_condition(), field_is_numeric) {
        (true, true) => Some(RejectReason::TextConditionOnNumericField),
        (false, false) => Some(RejectReason::NumericConditionOnTextField),
        (true, false) if numeric_value => Some(RejectReason::ValueLooksNumeric),
        (false, true) if !numeric_value => Some(RejectReason::ValueNotNumeric),
        _ => None,
    }
}

/// Render one predicate as a query fragment.
///
/// Text conditions read the field as text (`->>`) and match with
/// `like`/`ilike`; numeric conditions read the native JSON value (`->`).
/// Field and value are inserted verbatim.
pub fn render(
    condition: FilterCondition,
    field: &str,
    value: &str,
    join: JoinMode,
    case_sensitive: bool,
) -> String {
    let sep = join.separator();
    let like = if case_sensitive { "like" } else { "ilike" };

    match condition {
        FilterCondition::Contains => {
            format!("{VALUES_COLUMN}->>\"{field}\"{sep}{like}.*{value}*")
        }
        FilterCondition::Identical => {
            format!("{VALUES_COLUMN}->>\"{field}\"{sep}{like}.{value}")
        }
        FilterCondition::StartsWith => {
            format!("{VALUES_COLUMN}->>\"{field}\"{sep}{like}.{value}*")
        }
        FilterCondition::LessThan => numeric(field, sep, "lt", value),
        FilterCondition::LessThanOrEqual => numeric(field, sep, "lte", value),
        FilterCondition::GreaterThan => numeric(field, sep, "gt", value),
        FilterCondition::GreaterThanOrEqual => numeric(field, sep, "gte", value),
        FilterCondition::Equal => numeric(field, sep, "eq", value),
    }
}

fn numeric(field: &str, sep: char, op: &str, value: &str) -> String {
    format!("{VALUES_COLUMN}->\"{field}\"{sep}{op}.{value}")
}

/// Join rendered fragments.
///
/// AND produces `a&b` (extra top-level parameters), OR produces `or=(a,b)`.
/// An empty list yields `""` and `or=()` respectively.
pub fn join<S: AsRef<str>>(join: JoinMode, fragments: &[S]) -> String {
    let parts: Vec<&str> = fragments.iter().map(AsRef::as_ref).collect();
    match join {
        JoinMode::And => parts.join("&"),
        JoinMode::Or => format!("or=({})", parts.join(",")),
    }
}

/// Compile a filter set in predicate order. Predicates are not re-validated.
pub fn compile(set: &FilterSet) -> String {
    let fragments: Vec<String> = set
        .predicates
        .iter()
        .map(|p| render(p.condition, &p.field, &p.value, set.join, set.case_sensitive))
        .collect();

    let query = join(set.join, &fragments);
    tracing::trace!(
        join = %set.join,
        case_sensitive = set.case_sensitive,
        predicates = fragments.len(),
        query = %query,
        "Compiled filter set"
    );
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterPredicate;

    const NUMERIC_OPS: [(FilterCondition, &str); 5] = [
        (FilterCondition::LessThan, "lt"),
        (FilterCondition::LessThanOrEqual, "lte"),
        (FilterCondition::GreaterThan, "gt"),
        (FilterCondition::GreaterThanOrEqual, "gte"),
        (FilterCondition::Equal, "eq"),
    ];

    #[test]
    fn string_condition_classifier() {
        assert!(is_string_condition(FilterCondition::Contains));
        assert!(is_string_condition(FilterCondition::Identical));
        assert!(is_string_condition(FilterCondition::StartsWith));
        for (condition, _) in NUMERIC_OPS {
            assert!(!is_string_condition(condition));
        }
    }

    #[test]
    fn render_string_patterns() {
        assert_eq!(
            render(FilterCondition::Contains, "category", "Books", JoinMode::And, false),
            r#"values->>"category"=ilike.*Books*"#
        );
        assert_eq!(
            render(FilterCondition::Identical, "category", "Books", JoinMode::And, false),
            r#"values->>"category"=ilike.Books"#
        );
        assert_eq!(
            render(FilterCondition::StartsWith, "category", "Books", JoinMode::And, false),
            r#"values->>"category"=ilike.Books*"#
        );
    }

    #[test]
    fn render_case_sensitivity_only_changes_like() {
        assert_eq!(
            render(FilterCondition::Contains, "category", "Books", JoinMode::And, true),
            r#"values->>"category"=like.*Books*"#
        );
        assert_eq!(
            render(FilterCondition::Contains, "category", "Books", JoinMode::Or, true),
            r#"values->>"category".like.*Books*"#
        );
        for (condition, _) in NUMERIC_OPS {
            assert_eq!(
                render(condition, "age", "3", JoinMode::And, true),
                render(condition, "age", "3", JoinMode::And, false)
            );
        }
    }

    #[test]
    fn render_numeric_operators() {
        for (condition, op) in NUMERIC_OPS {
            assert_eq!(
                render(condition, "age", "30", JoinMode::And, false),
                format!(r#"values->"age"={op}.30"#)
            );
            assert_eq!(
                render(condition, "age", "30", JoinMode::Or, false),
                format!(r#"values->"age".{op}.30"#)
            );
        }
    }

    #[test]
    fn render_is_verbatim() {
        assert_eq!(
            render(FilterCondition::Identical, "a b", "x&y", JoinMode::And, true),
            r#"values->>"a b"=like.x&y"#
        );
    }

    #[test]
    fn join_and_or() {
        let fragments = ["a=eq.1", "b=eq.2"];
        assert_eq!(join(JoinMode::And, &fragments), "a=eq.1&b=eq.2");
        assert_eq!(join(JoinMode::Or, &fragments), "or=(a=eq.1,b=eq.2)");
    }

    #[test]
    fn join_singleton() {
        let f = r#"values->"age".eq.30"#;
        assert_eq!(join(JoinMode::And, &[f]), f);
        assert_eq!(join(JoinMode::Or, &[f]), format!("or=({f})"));
    }

    #[test]
    fn join_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(join(JoinMode::And, &empty), "");
        assert_eq!(join(JoinMode::Or, &empty), "or=()");
    }

    #[test]
    fn validate_reports_reason() {
        let cases = [
            (FilterCondition::LessThan, false, "5", RejectReason::NumericConditionOnTextField),
            (FilterCondition::Contains, true, "abc", RejectReason::TextConditionOnNumericField),
            (FilterCondition::Equal, true, "abc", RejectReason::ValueNotNumeric),
            (FilterCondition::Contains, false, "42", RejectReason::ValueLooksNumeric),
        ];
        for (condition, numeric, value, expected) in cases {
            let err = validate_filter(condition, "f", numeric, value).unwrap_err();
            assert_eq!(
                err,
                FilterError::InvalidPredicate {
                    condition,
                    field: "f".to_string(),
                    reason: expected,
                }
            );
        }
    }

    #[test]
    fn validate_accepts_matching_pairs() {
        assert!(validate_filter(FilterCondition::Equal, "age", true, "42").is_ok());
        assert!(validate_filter(FilterCondition::StartsWith, "name", false, "Jo").is_ok());
    }

    #[test]
    fn compile_follows_set_order() {
        let set = FilterSet::new(JoinMode::And, false)
            .add(FilterPredicate::new(FilterCondition::GreaterThan, "age", "18"))
            .add(FilterPredicate::new(FilterCondition::Contains, "name", "an"));
        assert_eq!(
            compile(&set),
            r#"values->"age"=gt.18&values->>"name"=ilike.*an*"#
        );
    }
}
