//! Criteria-driven query layer for a carpooling backend.
//!
//! A [`Criteria`] holds one optional filter per queryable field of an
//! entity; the compiler turns it into a single conjunctive Sea-ORM
//! condition (with left-outer joins for filters on related identifiers),
//! and [`CriteriaQuery`] executes it as an unpaged find, a paged find with
//! independent total count, or a bare count:
//!
//! ```rust,ignore
//! use sea_orm::Order;
//! use shareazade::domain::ride;
//! use shareazade::{Criteria, CriteriaQuery, PageRequest, StringFilter};
//!
//! let criteria = Criteria::new()
//!     .filter("rideCityFrom", StringFilter::new().contains("Par"));
//! let page = PageRequest::new(0, 20).sorted_by("id", Order::Asc);
//! let rides = ride::Entity::find_by_criteria_paged(&db, &criteria, &page).await?;
//! ```
//!
//! Entities opt in by publishing a static field table ([`Filterable`]);
//! everything else is generic.

pub mod criteria;
pub mod domain;
pub mod errors;

pub use criteria::{
    compile, CompiledCriteria, Criteria, CriteriaQuery, FieldDescriptor, FieldFilter, FieldKind,
    FieldTarget, Filter, Filterable, Page, PageRequest, RangeFilter, RelationTarget, StringFilter,
};
pub use errors::{ApiError, CriteriaError, QueryError};
