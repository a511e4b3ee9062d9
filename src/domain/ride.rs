//! Rides in the legacy schema: city names denormalized as text alongside
//! the city relations, which makes this the entity exercising every filter
//! kind at once.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::RideType;
use crate::criteria::schema::{FieldDescriptor, FieldKind, Filterable};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "ride")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ride_date_time: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub ride_city_from: Option<String>,
    pub ride_city_to: Option<String>,
    pub ride_type: Option<RideType>,
    #[sea_orm(column_type = "Text", nullable)]
    pub ride_comments: Option<String>,
    pub ride_user_id: Option<i64>,
    pub ride_city_from_id: Option<i64>,
    pub ride_city_to_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::RideUserId",
        to = "super::users::Column::Id"
    )]
    RideUser,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::RideCityFromId",
        to = "super::city::Column::Id"
    )]
    RideCityFrom,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::RideCityToId",
        to = "super::city::Column::Id"
    )]
    RideCityTo,
}

impl ActiveModelBehavior for ActiveModel {}

fn ride_user() -> RelationDef {
    Relation::RideUser.def()
}

fn ride_city_from() -> RelationDef {
    Relation::RideCityFrom.def()
}

fn ride_city_to() -> RelationDef {
    Relation::RideCityTo.def()
}

impl Filterable for Entity {
    type Entity = Entity;
    const ENTITY_NAME: &'static str = "Ride";

    fn fields() -> &'static [FieldDescriptor<Entity>] {
        // ride_comments is a blob-like text column and deliberately not
        // filterable.
        const FIELDS: &[FieldDescriptor<Entity>] = &[
            FieldDescriptor::column("id", FieldKind::Long, Column::Id),
            FieldDescriptor::column("rideDateTime", FieldKind::DateTime, Column::RideDateTime),
            FieldDescriptor::column("rideCityFrom", FieldKind::Text, Column::RideCityFrom),
            FieldDescriptor::column("rideCityTo", FieldKind::Text, Column::RideCityTo),
            FieldDescriptor::column("rideType", FieldKind::Enum, Column::RideType),
            FieldDescriptor::relation("rideUserId", "ride_user", ride_user),
            FieldDescriptor::relation("rideCityFromId", "city_from", ride_city_from),
            FieldDescriptor::relation("rideCityToId", "city_to", ride_city_to),
        ];
        FIELDS
    }
}
