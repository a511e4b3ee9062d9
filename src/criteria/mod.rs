//! # Criteria querying
//!
//! Dynamic, declarative filtering over the domain entities: a [`Criteria`]
//! bundles one optional filter per queryable field plus a distinct toggle,
//! and compiles deterministically into a single conjunctive query
//! condition, including any left-outer joins demanded by relation filters.
//!
//! The REST layer maps `field.operator=value` query-string pairs onto the
//! filter primitives, for example:
//!
//! ```text
//! GET /rides?rideCityFrom.contains=Par&rideType.equals=OFFER
//! GET /rides?id.greaterThan=5&rideDateTime.specified=false
//! GET /rides?rideUserId.equals=42&distinct=true
//! ```
//!
//! which in code is:
//!
//! ```rust
//! use shareazade::{Criteria, RangeFilter, StringFilter};
//!
//! let criteria = Criteria::new()
//!     .filter("rideCityFrom", StringFilter::new().contains("Par"))
//!     .filter("id", RangeFilter::<i64>::new().greater_than(5))
//!     .distinct(true);
//! ```
//!
//! A criteria is built per request, compiled once, executed once and
//! discarded; compilation is pure and execution holds no shared state, so
//! concurrent queries need no coordination beyond the connection pool.

pub mod compile;
pub mod filter;
pub mod query;
pub mod schema;

pub use compile::{compile, CompiledCriteria, JoinClause};
pub use filter::{FieldFilter, Filter, RangeFilter, StringFilter};
pub use query::{CriteriaQuery, Page, PageRequest};
pub use schema::{FieldDescriptor, FieldKind, FieldTarget, Filterable, RelationTarget};

/// A per-request bundle of field filters.
///
/// Fields not mentioned contribute "always true"; all present filters
/// combine conjunctively. Mentioning the same field twice is allowed and
/// also conjoins. The bundle is immutable once handed to the compiler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    filters: Vec<(String, FieldFilter)>,
    distinct: Option<bool>,
}

impl Criteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter for a named field.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, filter: impl Into<FieldFilter>) -> Self {
        self.filters.push((field.into(), filter.into()));
        self
    }

    /// Request duplicate-row suppression (relevant once joins multiply rows).
    #[must_use]
    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = Some(distinct);
        self
    }

    pub fn filters(&self) -> impl Iterator<Item = (&str, &FieldFilter)> {
        self.filters
            .iter()
            .map(|(field, filter)| (field.as_str(), filter))
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct.unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.distinct.is_none()
    }
}
