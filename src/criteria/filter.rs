//! Single-field filter primitives.
//!
//! Each queryable field of an entity accepts at most one filter, and each
//! filter carries only the operators that make sense for its scalar kind:
//! plain equality and set membership for every kind, ordered comparisons for
//! numbers and timestamps, substring matching for text. Wire names follow
//! the `field.operator=value` convention of the REST layer
//! (`equals`, `notEquals`, `in`, `notIn`, `specified`, `greaterThan`,
//! `greaterThanOrEqual`, `lessThan`, `lessThanOrEqual`, `contains`,
//! `doesNotContain`).
//!
//! A filter with no operator set compiles to "always true": the absence of
//! a filter never excludes rows. When several operators are set on the same
//! filter they are conjoined; contradictory combinations are not rejected,
//! they simply match nothing.
//!
//! Null handling follows SQL three-valued logic: `equals`, `not_equals`,
//! the ordered operators and both membership operators never match rows
//! whose field is NULL. `specified(false)` is the only way to select NULL
//! rows, and `specified(true)` selects their complement.

// Spelled as `chrono::DateTime<FixedOffset>` (what `DateTimeWithTimeZone`
// aliases) so utoipa's name-based chrono support picks it up in `ToSchema`.
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::schema::FieldKind;

/// Operators shared by every filterable scalar kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Filter<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<T>,
    #[serde(default, rename = "in", skip_serializing_if = "Option::is_none")]
    pub is_in: Option<Vec<T>>,
    #[serde(default, rename = "notIn", skip_serializing_if = "Option::is_none")]
    pub is_not_in: Option<Vec<T>>,
    /// `true` requires the field to be non-null, `false` requires it null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specified: Option<bool>,
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            is_in: None,
            is_not_in: None,
            specified: None,
        }
    }
}

impl<T> Filter<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn equals(mut self, value: T) -> Self {
        self.equals = Some(value);
        self
    }

    #[must_use]
    pub fn not_equals(mut self, value: T) -> Self {
        self.not_equals = Some(value);
        self
    }

    #[must_use]
    pub fn is_in(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.is_in = Some(values.into_iter().collect());
        self
    }

    #[must_use]
    pub fn is_not_in(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.is_not_in = Some(values.into_iter().collect());
        self
    }

    #[must_use]
    pub fn specified(mut self, specified: bool) -> Self {
        self.specified = Some(specified);
        self
    }

    /// An empty filter contributes no condition at all.
    pub fn is_empty(&self) -> bool {
        self.equals.is_none()
            && self.not_equals.is_none()
            && self.is_in.is_none()
            && self.is_not_in.is_none()
            && self.specified.is_none()
    }
}

/// Filter over an ordered scalar (identifiers, numbers, timestamps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RangeFilter<T> {
    #[serde(flatten)]
    pub filter: Filter<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than_or_equal: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than_or_equal: Option<T>,
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            greater_than: None,
            greater_than_or_equal: None,
            less_than: None,
            less_than_or_equal: None,
        }
    }
}

impl<T> RangeFilter<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn equals(mut self, value: T) -> Self {
        self.filter.equals = Some(value);
        self
    }

    #[must_use]
    pub fn not_equals(mut self, value: T) -> Self {
        self.filter.not_equals = Some(value);
        self
    }

    #[must_use]
    pub fn is_in(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.filter.is_in = Some(values.into_iter().collect());
        self
    }

    #[must_use]
    pub fn is_not_in(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.filter.is_not_in = Some(values.into_iter().collect());
        self
    }

    #[must_use]
    pub fn specified(mut self, specified: bool) -> Self {
        self.filter.specified = Some(specified);
        self
    }

    #[must_use]
    pub fn greater_than(mut self, value: T) -> Self {
        self.greater_than = Some(value);
        self
    }

    #[must_use]
    pub fn greater_than_or_equal(mut self, value: T) -> Self {
        self.greater_than_or_equal = Some(value);
        self
    }

    #[must_use]
    pub fn less_than(mut self, value: T) -> Self {
        self.less_than = Some(value);
        self
    }

    #[must_use]
    pub fn less_than_or_equal(mut self, value: T) -> Self {
        self.less_than_or_equal = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
            && self.greater_than.is_none()
            && self.greater_than_or_equal.is_none()
            && self.less_than.is_none()
            && self.less_than_or_equal.is_none()
    }
}

/// Filter over a text column, adding case-sensitive substring matching.
///
/// `contains` and `does_not_contain` compile to `LIKE '%value%'` with the
/// value passed through verbatim, so `%` and `_` in the value keep their
/// SQL wildcard meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    #[serde(flatten)]
    pub filter: Filter<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_contain: Option<String>,
}

impl StringFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn equals(mut self, value: impl Into<String>) -> Self {
        self.filter.equals = Some(value.into());
        self
    }

    #[must_use]
    pub fn not_equals(mut self, value: impl Into<String>) -> Self {
        self.filter.not_equals = Some(value.into());
        self
    }

    #[must_use]
    pub fn is_in(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.filter.is_in = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn is_not_in(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.filter.is_not_in = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn specified(mut self, specified: bool) -> Self {
        self.filter.specified = Some(specified);
        self
    }

    #[must_use]
    pub fn contains(mut self, value: impl Into<String>) -> Self {
        self.contains = Some(value.into());
        self
    }

    #[must_use]
    pub fn does_not_contain(mut self, value: impl Into<String>) -> Self {
        self.does_not_contain = Some(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filter.is_empty() && self.contains.is_none() && self.does_not_contain.is_none()
    }
}

/// A filter tagged with its scalar kind.
///
/// This is what a [`Criteria`](super::Criteria) stores per field; the
/// compiler checks the tag against the entity's field descriptor before
/// building any condition, so an operator invalid for a field's kind can
/// never reach the query builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum FieldFilter {
    Long(RangeFilter<i64>),
    #[schema(value_type = RangeFilter<DateTime>)]
    DateTime(RangeFilter<DateTime<FixedOffset>>),
    Text(StringFilter),
    Enum(Filter<String>),
}

impl FieldFilter {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Long(_) => FieldKind::Long,
            Self::DateTime(_) => FieldKind::DateTime,
            Self::Text(_) => FieldKind::Text,
            Self::Enum(_) => FieldKind::Enum,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Long(f) => f.is_empty(),
            Self::DateTime(f) => f.is_empty(),
            Self::Text(f) => f.is_empty(),
            Self::Enum(f) => f.is_empty(),
        }
    }
}

impl From<RangeFilter<i64>> for FieldFilter {
    fn from(filter: RangeFilter<i64>) -> Self {
        Self::Long(filter)
    }
}

impl From<RangeFilter<DateTime<FixedOffset>>> for FieldFilter {
    fn from(filter: RangeFilter<DateTime<FixedOffset>>) -> Self {
        Self::DateTime(filter)
    }
}

impl From<StringFilter> for FieldFilter {
    fn from(filter: StringFilter) -> Self {
        Self::Text(filter)
    }
}

impl From<Filter<String>> for FieldFilter {
    fn from(filter: Filter<String>) -> Self {
        Self::Enum(filter)
    }
}
