//! Criteria-to-predicate compilation.
//!
//! [`compile`] turns a [`Criteria`] into a [`CompiledCriteria`]: one
//! conjunctive Sea-ORM [`Condition`] plus the left-outer joins needed by
//! relation filters and the distinct flag. Compilation is a pure in-memory
//! transformation with no database access; the result is applied to a
//! `Select` by the execution facade, possibly more than once (a page query
//! and its independent count share one compiled predicate).
//!
//! Joins are created lazily, only for relation filters that are actually
//! present, and de-duplicated by relation key within a single compile pass
//! so that two filters touching the same relation share one join. The join
//! is always a left-outer join: a row with an absent relation is only
//! excluded when the relation filter itself demands a match.

use std::collections::HashMap;

use sea_orm::sea_query::{Alias, ColumnRef, Expr, IntoColumnRef};
use sea_orm::{Condition, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationDef, Select};

use super::filter::{FieldFilter, Filter, RangeFilter, StringFilter};
use super::schema::{FieldTarget, Filterable, RelationTarget};
use super::Criteria;
use crate::errors::CriteriaError;

/// A left-outer join required by one or more relation filters.
#[derive(Debug)]
pub struct JoinClause {
    /// Relation key, also used as the table alias.
    pub relation: &'static str,
    pub def: fn() -> RelationDef,
    pub alias: Alias,
}

/// The executable form of a [`Criteria`].
#[derive(Debug)]
pub struct CompiledCriteria {
    condition: Condition,
    joins: Vec<JoinClause>,
    distinct: bool,
}

impl CompiledCriteria {
    /// Attach joins, distinct and the WHERE condition to a select.
    pub fn apply<E: EntityTrait>(&self, mut select: Select<E>) -> Select<E> {
        for join in &self.joins {
            select = select.join_as(JoinType::LeftJoin, (join.def)(), join.alias.clone());
        }
        if self.distinct {
            select = select.distinct();
        }
        select.filter(self.condition.clone())
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }
}

/// Join cache scoped to one compile pass.
#[derive(Default)]
struct JoinResolver {
    joins: Vec<JoinClause>,
    seen: HashMap<&'static str, usize>,
}

impl JoinResolver {
    fn resolve(&mut self, target: &RelationTarget) -> Alias {
        if let Some(&index) = self.seen.get(target.name) {
            return self.joins[index].alias.clone();
        }
        let alias = Alias::new(target.name);
        self.seen.insert(target.name, self.joins.len());
        self.joins.push(JoinClause {
            relation: target.name,
            def: target.def,
            alias: alias.clone(),
        });
        alias
    }
}

/// Compile a criteria bundle against the field table of `F`.
///
/// Every present filter is checked against its descriptor and ANDed into
/// an accumulator that starts out always-true, so an empty criteria
/// matches every row. Unknown fields and kind mismatches fail fast with a
/// field-identifying [`CriteriaError`].
pub fn compile<F: Filterable>(criteria: &Criteria) -> Result<CompiledCriteria, CriteriaError> {
    let mut condition = Condition::all();
    let mut joins = JoinResolver::default();

    for (field, filter) in criteria.filters() {
        let descriptor = F::descriptor(field).ok_or_else(|| CriteriaError::UnknownField {
            entity: F::ENTITY_NAME,
            field: field.to_string(),
        })?;
        if filter.kind() != descriptor.kind {
            return Err(CriteriaError::KindMismatch {
                entity: F::ENTITY_NAME,
                field: field.to_string(),
                expected: descriptor.kind,
                actual: filter.kind(),
            });
        }

        let column = match &descriptor.target {
            FieldTarget::Column(column) => {
                (F::Entity::default(), *column).into_column_ref()
            }
            FieldTarget::Relation(target) => {
                let alias = joins.resolve(target);
                (alias, Alias::new(target.related_id)).into_column_ref()
            }
        };

        condition = condition.add(match filter {
            FieldFilter::Long(filter) => range_condition(&column, filter),
            FieldFilter::DateTime(filter) => range_condition(&column, filter),
            FieldFilter::Text(filter) => string_condition(&column, filter),
            FieldFilter::Enum(filter) => equality_condition(&column, filter),
        });
    }

    Ok(CompiledCriteria {
        condition,
        joins: joins.joins,
        distinct: criteria.is_distinct(),
    })
}

fn equality_condition<V>(column: &ColumnRef, filter: &Filter<V>) -> Condition
where
    V: Into<sea_orm::Value> + Clone,
{
    let mut condition = Condition::all();
    if let Some(value) = &filter.equals {
        condition = condition.add(Expr::col(column.clone()).eq(value.clone()));
    }
    if let Some(value) = &filter.not_equals {
        condition = condition.add(Expr::col(column.clone()).ne(value.clone()));
    }
    if let Some(values) = &filter.is_in {
        condition = condition.add(Expr::col(column.clone()).is_in(values.iter().cloned()));
    }
    if let Some(values) = &filter.is_not_in {
        condition = condition.add(Expr::col(column.clone()).is_not_in(values.iter().cloned()));
    }
    if let Some(specified) = filter.specified {
        condition = condition.add(if specified {
            Expr::col(column.clone()).is_not_null()
        } else {
            Expr::col(column.clone()).is_null()
        });
    }
    condition
}

fn range_condition<V>(column: &ColumnRef, filter: &RangeFilter<V>) -> Condition
where
    V: Into<sea_orm::Value> + Clone,
{
    let mut condition = equality_condition(column, &filter.filter);
    if let Some(value) = &filter.greater_than {
        condition = condition.add(Expr::col(column.clone()).gt(value.clone()));
    }
    if let Some(value) = &filter.greater_than_or_equal {
        condition = condition.add(Expr::col(column.clone()).gte(value.clone()));
    }
    if let Some(value) = &filter.less_than {
        condition = condition.add(Expr::col(column.clone()).lt(value.clone()));
    }
    if let Some(value) = &filter.less_than_or_equal {
        condition = condition.add(Expr::col(column.clone()).lte(value.clone()));
    }
    condition
}

// Substring values are not wildcard-escaped; `%` and `_` stay live in the
// LIKE pattern.
fn string_condition(column: &ColumnRef, filter: &StringFilter) -> Condition {
    let mut condition = equality_condition(column, &filter.filter);
    if let Some(value) = &filter.contains {
        condition = condition.add(Expr::col(column.clone()).like(format!("%{value}%")));
    }
    if let Some(value) = &filter.does_not_contain {
        condition = condition.add(Expr::col(column.clone()).not_like(format!("%{value}%")));
    }
    condition
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, EntityTrait, QueryTrait};

    use super::*;
    use crate::criteria::filter::{RangeFilter, StringFilter};
    use crate::criteria::Criteria;
    use crate::domain::ride;

    fn sql(criteria: &Criteria) -> String {
        let compiled = compile::<ride::Entity>(criteria).unwrap();
        compiled
            .apply(ride::Entity::find())
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn empty_criteria_compiles_to_no_where_clause() {
        let compiled = compile::<ride::Entity>(&Criteria::new()).unwrap();
        assert!(compiled.joins().is_empty());
        assert!(!compiled.is_distinct());
        assert!(!sql(&Criteria::new()).contains("WHERE"));
    }

    #[test]
    fn column_conditions_are_table_qualified() {
        let criteria =
            Criteria::new().filter("rideCityFrom", StringFilter::new().equals("Paris"));
        let query = sql(&criteria);
        assert!(query.contains(r#""ride"."ride_city_from" = 'Paris'"#), "{query}");
    }

    #[test]
    fn string_operators_compile_to_like_patterns() {
        let criteria = Criteria::new().filter(
            "rideCityFrom",
            StringFilter::new().contains("Par").does_not_contain("Lyo"),
        );
        let query = sql(&criteria);
        assert!(query.contains(r#"LIKE '%Par%'"#), "{query}");
        assert!(query.contains(r#"NOT LIKE '%Lyo%'"#), "{query}");
    }

    #[test]
    fn specified_compiles_to_null_checks() {
        let query = sql(&Criteria::new()
            .filter("rideType", crate::Filter::<String>::new().specified(false)));
        assert!(query.contains("IS NULL"), "{query}");

        let query = sql(&Criteria::new()
            .filter("rideType", crate::Filter::<String>::new().specified(true)));
        assert!(query.contains("IS NOT NULL"), "{query}");
    }

    #[test]
    fn relation_filter_compiles_to_left_outer_join() {
        let criteria =
            Criteria::new().filter("rideUserId", RangeFilter::<i64>::new().equals(42));
        let compiled = compile::<ride::Entity>(&criteria).unwrap();
        assert_eq!(compiled.joins().len(), 1);
        let query = sql(&criteria);
        assert!(query.contains(r#"LEFT JOIN "users" AS "ride_user""#), "{query}");
        assert!(query.contains(r#""ride_user"."id" = 42"#), "{query}");
    }

    #[test]
    fn repeated_relation_filters_share_one_join() {
        let criteria = Criteria::new()
            .filter("rideCityFromId", RangeFilter::<i64>::new().greater_than(1))
            .filter("rideCityFromId", RangeFilter::<i64>::new().less_than(10));
        let compiled = compile::<ride::Entity>(&criteria).unwrap();
        assert_eq!(compiled.joins().len(), 1);
    }

    #[test]
    fn distinct_relations_get_separate_joins() {
        let criteria = Criteria::new()
            .filter("rideCityFromId", RangeFilter::<i64>::new().equals(1))
            .filter("rideCityToId", RangeFilter::<i64>::new().equals(2));
        let compiled = compile::<ride::Entity>(&criteria).unwrap();
        assert_eq!(compiled.joins().len(), 2);
        let query = sql(&criteria);
        assert!(query.contains(r#"AS "city_from""#), "{query}");
        assert!(query.contains(r#"AS "city_to""#), "{query}");
    }

    #[test]
    fn distinct_flag_is_carried_into_sql() {
        let criteria = Criteria::new().distinct(true);
        let compiled = compile::<ride::Entity>(&criteria).unwrap();
        assert!(compiled.is_distinct());
        assert!(sql(&criteria).contains("SELECT DISTINCT"));
    }

    #[test]
    fn unknown_field_fails_fast() {
        let criteria =
            Criteria::new().filter("rideColor", StringFilter::new().equals("red"));
        let err = compile::<ride::Entity>(&criteria).unwrap_err();
        assert_eq!(
            err,
            CriteriaError::UnknownField {
                entity: "Ride",
                field: "rideColor".to_string(),
            }
        );
    }

    #[test]
    fn kind_mismatch_fails_fast() {
        // rideDateTime is a timestamp, a string filter must be rejected.
        let criteria =
            Criteria::new().filter("rideDateTime", StringFilter::new().equals("2023"));
        let err = compile::<ride::Entity>(&criteria).unwrap_err();
        assert!(matches!(err, CriteriaError::KindMismatch { .. }));
        assert!(err.to_string().contains("rideDateTime"));
    }

    #[test]
    fn multiple_operators_on_one_filter_are_conjoined() {
        let criteria = Criteria::new().filter(
            "id",
            RangeFilter::<i64>::new().greater_than(1).less_than(5),
        );
        let query = sql(&criteria);
        assert!(query.contains(r#""ride"."id" > 1"#), "{query}");
        assert!(query.contains(r#""ride"."id" < 5"#), "{query}");
        assert!(query.contains("AND"), "{query}");
    }
}
