//! Declarative field descriptors for filterable entities.
//!
//! Each entity exposes a static table mapping the wire-level field names of
//! its criteria to a scalar kind and a target: either one of the entity's
//! own columns, or the identifier of a related entity reached through a
//! left-outer join. The compiler walks this table instead of reflecting
//! over an entity metamodel at runtime, and a field name missing from the
//! table is a configuration error, never a silent no-op.

use std::fmt;

use sea_orm::{EntityTrait, RelationDef};

/// Scalar kind of a filterable field, deciding which operators apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 64-bit identifiers and counts; ordered.
    Long,
    /// Timestamps with time zone; ordered.
    DateTime,
    /// Text columns; equality plus substring matching.
    Text,
    /// String-backed enumerations; discrete equality and membership only.
    Enum,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Long => "long",
            Self::DateTime => "dateTime",
            Self::Text => "text",
            Self::Enum => "enum",
        };
        f.write_str(name)
    }
}

/// A related entity reached through a join, keyed by `name` so that two
/// filters touching the same relation share one join.
pub struct RelationTarget {
    /// Stable relation key; doubles as the SQL table alias.
    pub name: &'static str,
    /// Produces the Sea-ORM relation to join through.
    pub def: fn() -> RelationDef,
    /// Identifier column on the related table.
    pub related_id: &'static str,
}

/// Where a field's condition is evaluated.
pub enum FieldTarget<E: EntityTrait> {
    /// A column on the entity itself.
    Column(E::Column),
    /// The identifier of a related entity, requiring a left-outer join.
    Relation(RelationTarget),
}

/// One entry of an entity's filterable-field table.
pub struct FieldDescriptor<E: EntityTrait> {
    /// Wire-level field name as it appears in criteria (camelCase).
    pub name: &'static str,
    pub kind: FieldKind,
    pub target: FieldTarget<E>,
}

impl<E: EntityTrait> FieldDescriptor<E> {
    pub const fn column(name: &'static str, kind: FieldKind, column: E::Column) -> Self {
        Self {
            name,
            kind,
            target: FieldTarget::Column(column),
        }
    }

    /// Relation filters always target the related identifier, so they are
    /// fixed to [`FieldKind::Long`].
    pub const fn relation(
        name: &'static str,
        relation: &'static str,
        def: fn() -> RelationDef,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::Long,
            target: FieldTarget::Relation(RelationTarget {
                name: relation,
                def,
                related_id: "id",
            }),
        }
    }
}

/// An entity with a criteria field table.
///
/// Implemented once per queryable entity; the blanket
/// [`CriteriaQuery`](super::query::CriteriaQuery) impl then provides the
/// find/page/count operations with no per-entity query code.
pub trait Filterable: Sized + Send + Sync {
    type Entity: EntityTrait + Sync;

    /// Human-readable entity name used in error messages and logs.
    const ENTITY_NAME: &'static str;

    fn fields() -> &'static [FieldDescriptor<Self::Entity>];

    fn descriptor(name: &str) -> Option<&'static FieldDescriptor<Self::Entity>> {
        Self::fields().iter().find(|descriptor| descriptor.name == name)
    }
}
