//! Record filter compiler
//!
//! Compiles user-specified predicates over the dynamic fields of a form into
//! a PostgREST query fragment against the record's JSON `values` column.
//! Predicates support text (`like`/`ilike`) and numeric (`lt`, `lte`, `gt`,
//! `gte`, `eq`) conditions, joined under AND or OR.
//!
//! ## Usage
//!
//! ```
//! use formbase::filters::{FilterCondition, FilterPredicate, FilterSet, JoinMode};
//!
//! let set = FilterSet::new(JoinMode::Or, false)
//!     .add(FilterPredicate::new(FilterCondition::Equal, "age", "30"))
//!     .add(FilterPredicate::new(FilterCondition::GreaterThan, "age", "40"));
//!
//! assert_eq!(set.compile(), r#"or=(values->"age".eq.30,values->"age".gt.40)"#);
//! ```
//!
//! Field names and values are not escaped. Use
//! [`FilterPredicate::reserved_chars`] to detect input that would change the
//! query grammar.

mod builder;
mod numeric;
mod parser;
mod types;

pub use builder::{compile, is_string_condition, is_valid_filter, join, render, validate_filter};
pub use numeric::looks_numeric;
pub use parser::{MAX_FILTER_JSON_SIZE, MAX_PREDICATES, parse_filter_set, validate_set};
pub use types::{FilterCondition, FilterPredicate, FilterSet, JoinMode};
