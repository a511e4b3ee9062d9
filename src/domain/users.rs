//! Carpooling user accounts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::{UserRole, UserStatus};
use crate::criteria::schema::{FieldDescriptor, FieldKind, Filterable};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub user_role: Option<UserRole>,
    pub user_phone: Option<String>,
    pub user_status: Option<UserStatus>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Filterable for Entity {
    type Entity = Entity;
    const ENTITY_NAME: &'static str = "Users";

    fn fields() -> &'static [FieldDescriptor<Entity>] {
        const FIELDS: &[FieldDescriptor<Entity>] = &[
            FieldDescriptor::column("id", FieldKind::Long, Column::Id),
            FieldDescriptor::column("userName", FieldKind::Text, Column::UserName),
            FieldDescriptor::column("userEmail", FieldKind::Text, Column::UserEmail),
            FieldDescriptor::column("userRole", FieldKind::Enum, Column::UserRole),
            FieldDescriptor::column("userPhone", FieldKind::Text, Column::UserPhone),
            FieldDescriptor::column("userStatus", FieldKind::Enum, Column::UserStatus),
        ];
        FIELDS
    }
}
