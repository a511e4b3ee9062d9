//! Query execution facade.
//!
//! [`CriteriaQuery`] is implemented for every [`Filterable`] entity and
//! offers the three read-only operations of the query layer: unpaged
//! retrieval, windowed retrieval with an independent total count, and a
//! bare count. Each call compiles its own predicate from its own criteria
//! and issues independent reads, so calls are safe to run concurrently.
//! Storage errors propagate unchanged; an empty result is a success, never
//! an error.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryOrder, QuerySelect};
use serde::Serialize;
use utoipa::ToSchema;

use super::compile::compile;
use super::schema::{FieldTarget, Filterable};
use super::Criteria;
use crate::errors::{CriteriaError, QueryError};

/// A page window: offset, limit and the requested sort order.
///
/// Sort fields are resolved through the entity's field table and must
/// target a column on the entity itself; sorting by a relation filter
/// field is a configuration error.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u64,
    pub sort: Vec<(String, Order)>,
}

impl PageRequest {
    #[must_use]
    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit,
            sort: Vec::new(),
        }
    }

    #[must_use]
    pub fn sorted_by(mut self, field: impl Into<String>, order: Order) -> Self {
        self.sort.push((field.into(), order));
        self
    }
}

/// One page of results plus the total match count across all pages.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Page<M> {
    pub items: Vec<M>,
    /// Count of all matching rows, independent of the page window.
    pub total_count: u64,
}

fn sort_column<F: Filterable>(
    field: &str,
) -> Result<<F::Entity as EntityTrait>::Column, CriteriaError> {
    match F::descriptor(field) {
        Some(descriptor) => match &descriptor.target {
            FieldTarget::Column(column) => Ok(*column),
            FieldTarget::Relation(_) => Err(CriteriaError::UnsortableField {
                entity: F::ENTITY_NAME,
                field: field.to_string(),
            }),
        },
        None => Err(CriteriaError::UnknownField {
            entity: F::ENTITY_NAME,
            field: field.to_string(),
        }),
    }
}

/// Read-only criteria operations over a [`Filterable`] entity.
///
/// Blanket-implemented; call as `ride::Entity::find_by_criteria(db, &c)`.
#[async_trait]
pub trait CriteriaQuery: Filterable
where
    <Self::Entity as EntityTrait>::Model: Send + Sync,
{
    /// Return every entity matching the criteria, in natural order.
    async fn find_by_criteria(
        db: &DatabaseConnection,
        criteria: &Criteria,
    ) -> Result<Vec<<Self::Entity as EntityTrait>::Model>, QueryError> {
        tracing::debug!(entity = Self::ENTITY_NAME, ?criteria, "find by criteria");
        let compiled = compile::<Self>(criteria)?;
        let models = compiled.apply(Self::Entity::find()).all(db).await?;
        Ok(models)
    }

    /// Return one page of matching entities plus the total match count.
    ///
    /// The count runs as a separate query over the same compiled predicate
    /// and ignores the page window.
    async fn find_by_criteria_paged(
        db: &DatabaseConnection,
        criteria: &Criteria,
        page: &PageRequest,
    ) -> Result<Page<<Self::Entity as EntityTrait>::Model>, QueryError> {
        tracing::debug!(
            entity = Self::ENTITY_NAME,
            ?criteria,
            offset = page.offset,
            limit = page.limit,
            "find page by criteria"
        );
        let compiled = compile::<Self>(criteria)?;
        let mut order_by = Vec::with_capacity(page.sort.len());
        for (field, order) in &page.sort {
            order_by.push((sort_column::<Self>(field)?, order.clone()));
        }

        let total_count = compiled.apply(Self::Entity::find()).count(db).await?;
        let mut select = compiled.apply(Self::Entity::find());
        for (column, order) in order_by {
            select = select.order_by(column, order);
        }
        let items = select.offset(page.offset).limit(page.limit).all(db).await?;
        Ok(Page { items, total_count })
    }

    /// Return the number of matching entities without materializing rows.
    async fn count_by_criteria(
        db: &DatabaseConnection,
        criteria: &Criteria,
    ) -> Result<u64, QueryError> {
        tracing::debug!(entity = Self::ENTITY_NAME, ?criteria, "count by criteria");
        let compiled = compile::<Self>(criteria)?;
        let count = compiled.apply(Self::Entity::find()).count(db).await?;
        Ok(count)
    }
}

#[async_trait]
impl<T> CriteriaQuery for T
where
    T: Filterable,
    <T::Entity as EntityTrait>::Model: Send + Sync,
{
}
