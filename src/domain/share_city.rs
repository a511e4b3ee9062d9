//! Cities of the shareable schema, each optionally owned by a user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::ShareCountry;
use crate::criteria::schema::{FieldDescriptor, FieldKind, Filterable};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "share_city")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub city_name: Option<String>,
    pub city_country: Option<ShareCountry>,
    pub user_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::share_user::Entity",
        from = "Column::UserId",
        to = "super::share_user::Column::Id"
    )]
    User,
}

impl ActiveModelBehavior for ActiveModel {}

fn user() -> RelationDef {
    Relation::User.def()
}

impl Filterable for Entity {
    type Entity = Entity;
    const ENTITY_NAME: &'static str = "ShareCity";

    fn fields() -> &'static [FieldDescriptor<Entity>] {
        const FIELDS: &[FieldDescriptor<Entity>] = &[
            FieldDescriptor::column("id", FieldKind::Long, Column::Id),
            FieldDescriptor::column("cityName", FieldKind::Text, Column::CityName),
            FieldDescriptor::column("cityCountry", FieldKind::Enum, Column::CityCountry),
            FieldDescriptor::relation("userId", "user", user),
        ];
        FIELDS
    }
}
