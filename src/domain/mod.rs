//! Domain entities of the carpooling backend.
//!
//! Two generations coexist: the legacy `users`/`city`/`ride` tables and
//! their shareable counterparts. Every queryable entity implements
//! [`Filterable`](crate::criteria::schema::Filterable) through a static
//! field table, which is all the criteria engine needs; there is no
//! per-entity query code.

pub mod city;
pub mod enums;
pub mod ride;
pub mod share_city;
pub mod share_ride;
pub mod share_user;
pub mod users;

pub use enums::{RideType, ShareCountry, UserRole, UserStatus};
