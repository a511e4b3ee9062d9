#![allow(dead_code)]

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

use shareazade::domain::enums::RideType;
use shareazade::domain::{city, ride, share_city, share_ride, share_user, users};

/// Fresh in-memory database with all domain tables.
pub async fn setup_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    db.execute(backend.build(&schema.create_table_from_entity(users::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(city::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(ride::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(share_user::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(share_city::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(share_ride::Entity)))
        .await?;

    Ok(db)
}

pub fn ts(rfc3339: &str) -> DateTimeWithTimeZone {
    DateTimeWithTimeZone::parse_from_rfc3339(rfc3339).unwrap()
}

pub async fn insert_ride(
    db: &DatabaseConnection,
    id: i64,
    city_from: &str,
    city_to: &str,
    ride_type: Option<RideType>,
) -> Result<ride::Model, DbErr> {
    ride::ActiveModel {
        id: Set(id),
        ride_city_from: Set(Some(city_from.to_string())),
        ride_city_to: Set(Some(city_to.to_string())),
        ride_type: Set(ride_type),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_ride_at(
    db: &DatabaseConnection,
    id: i64,
    city_from: &str,
    date_time: DateTimeWithTimeZone,
) -> Result<ride::Model, DbErr> {
    ride::ActiveModel {
        id: Set(id),
        ride_city_from: Set(Some(city_from.to_string())),
        ride_date_time: Set(Some(date_time)),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_linked_ride(
    db: &DatabaseConnection,
    id: i64,
    user_id: Option<i64>,
    city_from_id: Option<i64>,
    city_to_id: Option<i64>,
) -> Result<ride::Model, DbErr> {
    ride::ActiveModel {
        id: Set(id),
        ride_user_id: Set(user_id),
        ride_city_from_id: Set(city_from_id),
        ride_city_to_id: Set(city_to_id),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_user(
    db: &DatabaseConnection,
    id: i64,
    name: &str,
) -> Result<users::Model, DbErr> {
    users::ActiveModel {
        id: Set(id),
        user_name: Set(Some(name.to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_city(
    db: &DatabaseConnection,
    id: i64,
    name: &str,
) -> Result<city::Model, DbErr> {
    city::ActiveModel {
        id: Set(id),
        city_name: Set(Some(name.to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_share_user(
    db: &DatabaseConnection,
    id: i64,
    name: &str,
) -> Result<share_user::Model, DbErr> {
    share_user::ActiveModel {
        id: Set(id),
        user_name: Set(Some(name.to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_share_ride(
    db: &DatabaseConnection,
    id: i64,
    user_id: Option<i64>,
    ride_type: Option<RideType>,
) -> Result<share_ride::Model, DbErr> {
    share_ride::ActiveModel {
        id: Set(id),
        user_id: Set(user_id),
        ride_type: Set(ride_type),
        ..Default::default()
    }
    .insert(db)
    .await
}
