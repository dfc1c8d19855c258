//! # Formbase
//!
//! Record filtering for the Formbase form builder.
//!
//! Records of a form keep their user data in a JSON `values` column behind a
//! PostgREST API. This crate compiles user-specified filters over those
//! dynamic fields into PostgREST query strings, validates them against the
//! form's field catalog, and fetches the matching records.
//!
//! ## Quick Start
//!
//! ```
//! use formbase::filters::{FilterCondition, FilterPredicate, FilterSet, JoinMode};
//! use formbase::query::{RECORD_ENDPOINT, RecordQuery};
//!
//! let set = FilterSet::new(JoinMode::And, false)
//!     .add(FilterPredicate::new(FilterCondition::Contains, "category", "Fiction"));
//!
//! let path = RecordQuery::new(3).with_filters(&set).path(RECORD_ENDPOINT);
//! assert_eq!(path, r#"/record?form_id=eq.3&values->>"category"=ilike.*Fiction*"#);
//! ```

pub mod client;
pub mod error;
pub mod fields;
pub mod filters;
pub mod query;

pub use client::{ClientConfig, RecordClient};
pub use error::{ClientError, FilterError, RejectReason};
pub use fields::{Field, FieldCatalog};
pub use filters::{FilterCondition, FilterPredicate, FilterSet, JoinMode};
pub use query::RecordQuery;
