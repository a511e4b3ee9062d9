//! Filters on related identifiers: left-outer joins, alias separation for
//! twin relations, deduplication and the distinct flag.

mod common;

use common::{insert_city, insert_linked_ride, insert_share_ride, insert_share_user, insert_user, setup_db};
use shareazade::domain::{ride, share_ride};
use shareazade::{Criteria, CriteriaQuery, RangeFilter};

async fn seed_linked_rides() -> sea_orm::DatabaseConnection {
    let db = setup_db().await.unwrap();
    insert_user(&db, 10, "alice").await.unwrap();
    insert_user(&db, 11, "bob").await.unwrap();
    insert_city(&db, 20, "Paris").await.unwrap();
    insert_city(&db, 21, "Lyon").await.unwrap();

    insert_linked_ride(&db, 1, Some(10), Some(20), Some(21)).await.unwrap();
    insert_linked_ride(&db, 2, Some(11), Some(21), Some(20)).await.unwrap();
    // No driver and no linked cities.
    insert_linked_ride(&db, 3, None, None, None).await.unwrap();
    db
}

#[tokio::test]
async fn filter_by_related_user_id_selects_that_users_rides() {
    let db = seed_linked_rides().await;
    let criteria = Criteria::new().filter("rideUserId", RangeFilter::<i64>::new().equals(10));
    let rides = ride::Entity::find_by_criteria(&db, &criteria).await.unwrap();
    assert_eq!(rides.len(), 1);
    assert_eq!(rides[0].id, 1);
}

#[tokio::test]
async fn filter_by_nonexistent_related_id_matches_nothing() {
    let db = seed_linked_rides().await;
    let criteria = Criteria::new().filter("rideUserId", RangeFilter::<i64>::new().equals(999));
    assert_eq!(
        ride::Entity::count_by_criteria(&db, &criteria).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn twin_city_relations_filter_independently() {
    let db = seed_linked_rides().await;
    // Paris to Lyon, not Lyon to Paris.
    let criteria = Criteria::new()
        .filter("rideCityFromId", RangeFilter::<i64>::new().equals(20))
        .filter("rideCityToId", RangeFilter::<i64>::new().equals(21));
    let rides = ride::Entity::find_by_criteria(&db, &criteria).await.unwrap();
    assert_eq!(rides.len(), 1);
    assert_eq!(rides[0].id, 1);
}

#[tokio::test]
async fn left_join_keeps_rows_without_a_relation_for_specified_false() {
    let db = seed_linked_rides().await;
    let criteria = Criteria::new().filter("rideUserId", RangeFilter::<i64>::new().specified(false));
    let rides = ride::Entity::find_by_criteria(&db, &criteria).await.unwrap();
    assert_eq!(rides.len(), 1);
    assert_eq!(rides[0].id, 3);
}

#[tokio::test]
async fn specified_true_on_a_relation_excludes_unlinked_rows() {
    let db = seed_linked_rides().await;
    let criteria = Criteria::new().filter("rideUserId", RangeFilter::<i64>::new().specified(true));
    let rides = ride::Entity::find_by_criteria(&db, &criteria).await.unwrap();
    assert_eq!(rides.len(), 2);
    assert!(rides.iter().all(|r| r.ride_user_id.is_some()));
}

#[tokio::test]
async fn repeated_operators_on_one_relation_share_a_single_join() {
    let db = seed_linked_rides().await;
    // Both operators target the same relation; a duplicated join would
    // make the query fail or duplicate rows.
    let criteria = Criteria::new().filter(
        "rideUserId",
        RangeFilter::<i64>::new().greater_than_or_equal(10).less_than(11),
    );
    let rides = ride::Entity::find_by_criteria(&db, &criteria).await.unwrap();
    assert_eq!(rides.len(), 1);
    assert_eq!(rides[0].id, 1);
}

#[tokio::test]
async fn distinct_flag_collapses_duplicate_rows() {
    let db = seed_linked_rides().await;
    let criteria = Criteria::new()
        .filter("rideUserId", RangeFilter::<i64>::new().specified(true))
        .distinct(true);
    let rides = ride::Entity::find_by_criteria(&db, &criteria).await.unwrap();
    let mut ids: Vec<i64> = rides.iter().map(|r| r.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), rides.len());
    assert_eq!(rides.len(), 2);
}

#[tokio::test]
async fn count_agrees_with_find_in_the_presence_of_joins() {
    let db = seed_linked_rides().await;
    let criteria = Criteria::new()
        .filter("rideCityFromId", RangeFilter::<i64>::new().is_in([20, 21]))
        .distinct(true);
    let found = ride::Entity::find_by_criteria(&db, &criteria).await.unwrap();
    let count = ride::Entity::count_by_criteria(&db, &criteria).await.unwrap();
    assert_eq!(found.len() as u64, count);
}

#[tokio::test]
async fn shareable_schema_reuses_the_same_engine() {
    let db = seed_linked_rides().await;
    insert_share_user(&db, 30, "carol").await.unwrap();
    insert_share_ride(&db, 1, Some(30), None).await.unwrap();
    insert_share_ride(&db, 2, None, None).await.unwrap();

    let criteria = Criteria::new().filter("userId", RangeFilter::<i64>::new().equals(30));
    let rides = share_ride::Entity::find_by_criteria(&db, &criteria)
        .await
        .unwrap();
    assert_eq!(rides.len(), 1);
    assert_eq!(rides[0].id, 1);
}

#[tokio::test]
async fn unknown_relation_field_is_rejected_before_touching_the_database() {
    let db = seed_linked_rides().await;
    let criteria = Criteria::new().filter("driverId", RangeFilter::<i64>::new().equals(10));
    assert!(ride::Entity::find_by_criteria(&db, &criteria).await.is_err());
}
