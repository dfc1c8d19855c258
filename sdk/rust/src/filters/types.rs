//! Filter type definitions
//!
//! Defines the conditions, join modes and predicate sets used to filter
//! form records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Characters with a meaning in the PostgREST query grammar
const RESERVED_CHARS: &[char] = &['&', ',', '(', ')', '"', '*', '#', '='];

/// Comparison applied by a single predicate
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterCondition {
    #[serde(rename = "contain")]
    Contains,
    #[serde(rename = "identical")]
    Identical,
    #[serde(rename = "startWith")]
    StartsWith,
    #[serde(rename = "lessThan")]
    LessThan,
    #[serde(rename = "lessThanEqual")]
    LessThanOrEqual,
    #[serde(rename = "greaterThan")]
    GreaterThan,
    #[serde(rename = "greaterThanEqual")]
    GreaterThanOrEqual,
    #[serde(rename = "equal")]
    Equal,
}

impl FilterCondition {
    pub const ALL: [FilterCondition; 8] = [
        Self::Contains,
        Self::Identical,
        Self::StartsWith,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::Equal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "contain",
            Self::Identical => "identical",
            Self::StartsWith => "startWith",
            Self::LessThan => "lessThan",
            Self::LessThanOrEqual => "lessThanEqual",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanOrEqual => "greaterThanEqual",
            Self::Equal => "equal",
        }
    }

    /// Human-readable label shown when picking a condition
    pub fn label(&self) -> &'static str {
        match self {
            Self::Contains => "Includes word",
            Self::Identical => "Identical to word",
            Self::StartsWith => "Starts with word",
            Self::LessThan => "Less than",
            Self::LessThanOrEqual => "Less than or equal to",
            Self::GreaterThan => "Greater than",
            Self::GreaterThanOrEqual => "Greater than or equal to",
            Self::Equal => "Equal to",
        }
    }

    /// True for conditions that match text (`like`/`ilike`)
    pub fn is_string_condition(&self) -> bool {
        matches!(self, Self::Contains | Self::Identical | Self::StartsWith)
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterCondition {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| FilterError::UnrecognizedCondition(s.to_string()))
    }
}

/// Logical combinator applied across every predicate of a set
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    #[default]
    #[serde(alias = "AND")]
    And,
    #[serde(alias = "OR")]
    Or,
}

impl JoinMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Character placed between the column and the operator.
    ///
    /// Top-level parameters read `column=op.value`, entries inside `or=(...)`
    /// read `column.op.value`.
    pub fn separator(&self) -> char {
        match self {
            Self::And => '=',
            Self::Or => '.',
        }
    }
}

impl fmt::Display for JoinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JoinMode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            _ => Err(FilterError::UnrecognizedJoinMode(s.to_string())),
        }
    }
}

/// One user-specified filter
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub condition: FilterCondition,
    #[serde(alias = "fieldName")]
    pub field: String,
    pub value: String,
}

impl FilterPredicate {
    pub fn new(condition: FilterCondition, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            condition,
            field: field.into(),
            value: value.into(),
        }
    }

    /// Grammar characters found in the field name or value, in order of
    /// appearance and without duplicates.
    ///
    /// Field names and values are rendered verbatim, so any of these can
    /// change the meaning of the compiled query.
    pub fn reserved_chars(&self) -> Vec<char> {
        let mut found = Vec::new();
        for c in self.field.chars().chain(self.value.chars()) {
            if RESERVED_CHARS.contains(&c) && !found.contains(&c) {
                found.push(c);
            }
        }
        found
    }
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}: {}", self.condition, self.field, self.value)
    }
}

/// Predicates combined under one join mode and case setting.
///
/// Built incrementally as a value: every mutator consumes the set and
/// returns the updated one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub join: JoinMode,
    #[serde(default, alias = "case")]
    pub case_sensitive: bool,
    #[serde(default)]
    pub predicates: Vec<FilterPredicate>,
}

impl FilterSet {
    pub fn new(join: JoinMode, case_sensitive: bool) -> Self {
        Self {
            join,
            case_sensitive,
            predicates: Vec::new(),
        }
    }

    /// Append a predicate without validating it
    pub fn add(mut self, predicate: FilterPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Validate a predicate against its field's numeric flag, then append it
    pub fn try_add(self, predicate: FilterPredicate, field_is_numeric: bool) -> Result<Self, FilterError> {
        super::builder::validate_filter(
            predicate.condition,
            &predicate.field,
            field_is_numeric,
            &predicate.value,
        )?;
        Ok(self.add(predicate))
    }

    /// Drop every predicate equal to the given one
    pub fn remove(mut self, predicate: &FilterPredicate) -> Self {
        self.predicates.retain(|p| p != predicate);
        self
    }

    pub fn with_join(mut self, join: JoinMode) -> Self {
        self.join = join;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Compile into a PostgREST query fragment
    pub fn compile(&self) -> String {
        super::builder::compile(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_partition_is_exact() {
        let (text, numeric): (Vec<_>, Vec<_>) = FilterCondition::ALL
            .into_iter()
            .partition(|c| c.is_string_condition());

        assert_eq!(
            text,
            vec![
                FilterCondition::Contains,
                FilterCondition::Identical,
                FilterCondition::StartsWith
            ]
        );
        assert_eq!(
            numeric,
            vec![
                FilterCondition::LessThan,
                FilterCondition::LessThanOrEqual,
                FilterCondition::GreaterThan,
                FilterCondition::GreaterThanOrEqual,
                FilterCondition::Equal
            ]
        );
    }

    #[test]
    fn condition_from_str_matches_wire_names() {
        for condition in FilterCondition::ALL {
            assert_eq!(condition.as_str().parse::<FilterCondition>(), Ok(condition));
        }
    }

    #[test]
    fn condition_from_str_rejects_unknown() {
        assert_eq!(
            "between".parse::<FilterCondition>(),
            Err(FilterError::UnrecognizedCondition("between".to_string()))
        );
        // Wire names are case-sensitive
        assert!("Contain".parse::<FilterCondition>().is_err());
    }

    #[test]
    fn condition_serde_uses_wire_names() {
        let json = serde_json::to_string(&FilterCondition::GreaterThanOrEqual).unwrap();
        assert_eq!(json, r#""greaterThanEqual""#);

        let condition: FilterCondition = serde_json::from_str(r#""startWith""#).unwrap();
        assert_eq!(condition, FilterCondition::StartsWith);
    }

    #[test]
    fn condition_labels() {
        assert_eq!(FilterCondition::Contains.label(), "Includes word");
        assert_eq!(
            FilterCondition::GreaterThanOrEqual.label(),
            "Greater than or equal to"
        );
    }

    #[test]
    fn join_mode_parse_is_case_insensitive() {
        assert_eq!("AND".parse::<JoinMode>(), Ok(JoinMode::And));
        assert_eq!("or".parse::<JoinMode>(), Ok(JoinMode::Or));
        assert!("xor".parse::<JoinMode>().is_err());
    }

    #[test]
    fn join_mode_serde_accepts_upper_case() {
        let mode: JoinMode = serde_json::from_str(r#""OR""#).unwrap();
        assert_eq!(mode, JoinMode::Or);
        let mode: JoinMode = serde_json::from_str(r#""and""#).unwrap();
        assert_eq!(mode, JoinMode::And);
    }

    #[test]
    fn join_mode_separator() {
        assert_eq!(JoinMode::And.separator(), '=');
        assert_eq!(JoinMode::Or.separator(), '.');
    }

    #[test]
    fn predicate_display() {
        let p = FilterPredicate::new(FilterCondition::Contains, "category", "Books");
        assert_eq!(p.to_string(), "contain-category: Books");
    }

    #[test]
    fn predicate_reserved_chars() {
        let clean = FilterPredicate::new(FilterCondition::Equal, "price", "-3.5");
        assert!(clean.reserved_chars().is_empty());

        let dirty = FilterPredicate::new(FilterCondition::Contains, "a,b", "x&y,z");
        assert_eq!(dirty.reserved_chars(), vec![',', '&']);
    }

    #[test]
    fn set_add_and_remove() {
        let books = FilterPredicate::new(FilterCondition::Contains, "category", "Books");
        let age = FilterPredicate::new(FilterCondition::Equal, "age", "30");

        let set = FilterSet::default()
            .add(books.clone())
            .add(age.clone())
            .add(books.clone());
        assert_eq!(set.len(), 3);

        let set = set.remove(&books);
        assert_eq!(set.predicates, vec![age.clone()]);

        let set = set.remove(&age);
        assert!(set.is_empty());
    }

    #[test]
    fn set_remove_missing_is_noop() {
        let age = FilterPredicate::new(FilterCondition::Equal, "age", "30");
        let other = FilterPredicate::new(FilterCondition::Equal, "age", "31");
        let set = FilterSet::default().add(age.clone()).remove(&other);
        assert_eq!(set.predicates, vec![age]);
    }

    #[test]
    fn set_try_add_rejects_mismatch() {
        let set = FilterSet::default();
        let result = set.try_add(
            FilterPredicate::new(FilterCondition::LessThan, "title", "5"),
            false,
        );
        assert!(matches!(
            result,
            Err(FilterError::InvalidPredicate { .. })
        ));
    }

    #[test]
    fn set_try_add_accepts_valid() {
        let set = FilterSet::default()
            .try_add(FilterPredicate::new(FilterCondition::Equal, "age", "42"), true)
            .unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn set_toggles() {
        let set = FilterSet::default();
        assert_eq!(set.join, JoinMode::And);
        assert!(!set.case_sensitive);

        let set = set.with_join(JoinMode::Or).with_case_sensitive(true);
        assert_eq!(set.join, JoinMode::Or);
        assert!(set.case_sensitive);
    }

    #[test]
    fn set_deserialize_defaults() {
        let set: FilterSet = serde_json::from_str("{}").unwrap();
        assert_eq!(set, FilterSet::default());
    }

    #[test]
    fn set_deserialize_original_keys() {
        let json = r#"{
            "join": "OR",
            "case": true,
            "predicates": [{"condition": "contain", "fieldName": "title", "value": "Rust"}]
        }"#;
        let set: FilterSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.join, JoinMode::Or);
        assert!(set.case_sensitive);
        assert_eq!(set.predicates[0].field, "title");
    }
}
