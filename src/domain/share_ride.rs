//! Rides of the shareable schema: cities are proper relations here, no
//! denormalized text columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::RideType;
use crate::criteria::schema::{FieldDescriptor, FieldKind, Filterable};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "share_ride")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ride_date_time: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub ride_type: Option<RideType>,
    #[sea_orm(column_type = "Text", nullable)]
    pub ride_comments: Option<String>,
    pub ride_city_from_id: Option<i64>,
    pub ride_city_to_id: Option<i64>,
    pub user_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::share_city::Entity",
        from = "Column::RideCityFromId",
        to = "super::share_city::Column::Id"
    )]
    RideCityFrom,
    #[sea_orm(
        belongs_to = "super::share_city::Entity",
        from = "Column::RideCityToId",
        to = "super::share_city::Column::Id"
    )]
    RideCityTo,
    #[sea_orm(
        belongs_to = "super::share_user::Entity",
        from = "Column::UserId",
        to = "super::share_user::Column::Id"
    )]
    User,
}

impl ActiveModelBehavior for ActiveModel {}

fn ride_city_from() -> RelationDef {
    Relation::RideCityFrom.def()
}

fn ride_city_to() -> RelationDef {
    Relation::RideCityTo.def()
}

fn user() -> RelationDef {
    Relation::User.def()
}

impl Filterable for Entity {
    type Entity = Entity;
    const ENTITY_NAME: &'static str = "ShareRide";

    fn fields() -> &'static [FieldDescriptor<Entity>] {
        const FIELDS: &[FieldDescriptor<Entity>] = &[
            FieldDescriptor::column("id", FieldKind::Long, Column::Id),
            FieldDescriptor::column("rideDateTime", FieldKind::DateTime, Column::RideDateTime),
            FieldDescriptor::column("rideType", FieldKind::Enum, Column::RideType),
            FieldDescriptor::relation("rideCityFromId", "city_from", ride_city_from),
            FieldDescriptor::relation("rideCityToId", "city_to", ride_city_to),
            FieldDescriptor::relation("userId", "user", user),
        ];
        FIELDS
    }
}
