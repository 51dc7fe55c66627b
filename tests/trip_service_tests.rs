use chrono::NaiveDate;
use wayfarer::{
    error::ApiError,
    models::{CreateTripRequest, TripDestinationInput, TripListFilter},
    test_utils::test_helpers,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn attachment(destination_id: i64, day_number: i64, sort_order: i64) -> TripDestinationInput {
    TripDestinationInput {
        destination_id,
        day_number,
        sort_order,
        notes: None,
        start_time: None,
        duration_minutes: None,
    }
}

fn trip_request(
    title: &str,
    start: NaiveDate,
    end: NaiveDate,
    destinations: Vec<TripDestinationInput>,
) -> CreateTripRequest {
    CreateTripRequest {
        title: title.to_string(),
        description: None,
        start_date: start,
        end_date: end,
        is_public: false,
        destinations,
    }
}

#[tokio::test]
async fn create_persists_trip_with_ordered_attachments() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_test_state(pool.clone(), "http://localhost:1");
    let user_id = test_helpers::insert_test_user(&pool, "a@x.com", "alice", "pw1234567", true)
        .await
        .unwrap();
    let d1 = test_helpers::insert_test_destination(&pool, "Uluwatu Temple", None)
        .await
        .unwrap();
    let d2 = test_helpers::insert_test_destination(&pool, "Kuta Beach", None)
        .await
        .unwrap();

    let trip = state
        .trip_service
        .create(
            user_id,
            trip_request(
                "Bali",
                date(2024, 1, 1),
                date(2024, 1, 3),
                vec![attachment(d2, 2, 0), attachment(d1, 1, 0)],
            ),
        )
        .await
        .unwrap();

    assert_eq!(trip.destinations.len(), 2);
    // Presentation order: day ascending.
    assert_eq!(trip.destinations[0].destination_id, d1);
    assert_eq!(trip.destinations[1].destination_id, d2);
}

#[tokio::test]
async fn create_with_unknown_destination_fails_and_persists_nothing() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_test_state(pool.clone(), "http://localhost:1");
    let user_id = test_helpers::insert_test_user(&pool, "a@x.com", "alice", "pw1234567", true)
        .await
        .unwrap();
    let d1 = test_helpers::insert_test_destination(&pool, "Uluwatu Temple", None)
        .await
        .unwrap();

    let result = state
        .trip_service
        .create(
            user_id,
            trip_request(
                "Bali",
                date(2024, 1, 1),
                date(2024, 1, 3),
                vec![attachment(d1, 1, 0), attachment(9999, 1, 1)],
            ),
        )
        .await;

    assert!(matches!(result, Err(ApiError::NotFound(msg)) if msg.contains("9999")));

    // Validation runs before the write: no orphan trip is left behind.
    let trips = state
        .trip_service
        .list(user_id, TripListFilter::default())
        .await
        .unwrap();
    assert!(trips.is_empty());
}

#[tokio::test]
async fn list_is_ownership_scoped_and_date_filtered() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_test_state(pool.clone(), "http://localhost:1");
    let alice = test_helpers::insert_test_user(&pool, "a@x.com", "alice", "pw1234567", true)
        .await
        .unwrap();
    let bob = test_helpers::insert_test_user(&pool, "b@x.com", "bob", "pw1234567", true)
        .await
        .unwrap();

    state
        .trip_service
        .create(
            alice,
            trip_request("January", date(2024, 1, 10), date(2024, 1, 15), vec![]),
        )
        .await
        .unwrap();
    state
        .trip_service
        .create(
            alice,
            trip_request("March", date(2024, 3, 1), date(2024, 3, 5), vec![]),
        )
        .await
        .unwrap();
    state
        .trip_service
        .create(
            bob,
            trip_request("Bob's trip", date(2024, 1, 10), date(2024, 1, 15), vec![]),
        )
        .await
        .unwrap();

    let all = state
        .trip_service
        .list(alice, TripListFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|t| t.trip.user_id == alice));
    // Ordered by start date descending.
    assert_eq!(all[0].trip.title, "March");
    assert_eq!(all[1].trip.title, "January");

    let filtered = state
        .trip_service
        .list(
            alice,
            TripListFilter {
                start_date: Some(date(2024, 2, 1)),
                end_date: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].trip.title, "March");
}

#[tokio::test]
async fn non_owner_cannot_see_update_or_delete_a_trip() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_test_state(pool.clone(), "http://localhost:1");
    let alice = test_helpers::insert_test_user(&pool, "a@x.com", "alice", "pw1234567", true)
        .await
        .unwrap();
    let bob = test_helpers::insert_test_user(&pool, "b@x.com", "bob", "pw1234567", true)
        .await
        .unwrap();

    let trip = state
        .trip_service
        .create(
            alice,
            trip_request("Bali", date(2024, 1, 1), date(2024, 1, 3), vec![]),
        )
        .await
        .unwrap();
    let trip_id = trip.trip.id;

    // A non-owned trip is indistinguishable from a missing one.
    let get = state.trip_service.get(bob, trip_id).await;
    assert!(matches!(get, Err(ApiError::NotFound(msg)) if msg == "Trip not found"));

    let update = state
        .trip_service
        .update(bob, trip_id, Default::default())
        .await;
    assert!(matches!(update, Err(ApiError::NotFound(_))));

    let delete = state.trip_service.delete(bob, trip_id).await;
    assert!(matches!(delete, Err(ApiError::NotFound(_))));

    // Still intact for its owner.
    assert!(state.trip_service.get(alice, trip_id).await.is_ok());
}

#[tokio::test]
async fn update_applies_only_supplied_fields() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_test_state(pool.clone(), "http://localhost:1");
    let user_id = test_helpers::insert_test_user(&pool, "a@x.com", "alice", "pw1234567", true)
        .await
        .unwrap();

    let trip = state
        .trip_service
        .create(
            user_id,
            trip_request("Bali", date(2024, 1, 1), date(2024, 1, 3), vec![]),
        )
        .await
        .unwrap();

    let updated = state
        .trip_service
        .update(
            user_id,
            trip.trip.id,
            wayfarer::models::UpdateTripRequest {
                title: Some("Bali, revisited".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.trip.title, "Bali, revisited");
    assert_eq!(updated.trip.start_date, date(2024, 1, 1));
    assert_eq!(updated.trip.end_date, date(2024, 1, 3));
}

#[tokio::test]
async fn ordering_contract_tolerates_gaps_and_duplicates() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_test_state(pool.clone(), "http://localhost:1");
    let user_id = test_helpers::insert_test_user(&pool, "a@x.com", "alice", "pw1234567", true)
        .await
        .unwrap();
    let d1 = test_helpers::insert_test_destination(&pool, "Temple", None)
        .await
        .unwrap();
    let d2 = test_helpers::insert_test_destination(&pool, "Beach", None)
        .await
        .unwrap();
    let d3 = test_helpers::insert_test_destination(&pool, "Market", None)
        .await
        .unwrap();

    // Gapped orders and a duplicate (day 1, order 5) position.
    let trip = state
        .trip_service
        .create(
            user_id,
            trip_request(
                "Bali",
                date(2024, 1, 1),
                date(2024, 1, 3),
                vec![
                    attachment(d1, 1, 5),
                    attachment(d2, 1, 5),
                    attachment(d3, 1, 0),
                ],
            ),
        )
        .await
        .unwrap();

    let ids: Vec<i64> = trip
        .destinations
        .iter()
        .map(|a| a.destination_id)
        .collect();

    // Order values are stored verbatim; equal keys keep insertion order.
    assert_eq!(ids, vec![d3, d1, d2]);
    assert_eq!(trip.destinations[1].sort_order, 5);
    assert_eq!(trip.destinations[2].sort_order, 5);
}

#[tokio::test]
async fn reorder_replaces_the_full_attachment_set() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_test_state(pool.clone(), "http://localhost:1");
    let user_id = test_helpers::insert_test_user(&pool, "a@x.com", "alice", "pw1234567", true)
        .await
        .unwrap();
    let d1 = test_helpers::insert_test_destination(&pool, "Temple", None)
        .await
        .unwrap();
    let d2 = test_helpers::insert_test_destination(&pool, "Beach", None)
        .await
        .unwrap();

    let trip = state
        .trip_service
        .create(
            user_id,
            trip_request(
                "Bali",
                date(2024, 1, 1),
                date(2024, 1, 3),
                vec![attachment(d1, 1, 0), attachment(d2, 1, 1)],
            ),
        )
        .await
        .unwrap();
    let trip_id = trip.trip.id;

    // Swap the two positions.
    let reordered = state
        .trip_service
        .reorder(
            user_id,
            trip_id,
            vec![attachment(d2, 1, 0), attachment(d1, 1, 1)],
        )
        .await
        .unwrap();

    let ids: Vec<i64> = reordered
        .destinations
        .iter()
        .map(|a| a.destination_id)
        .collect();
    assert_eq!(ids, vec![d2, d1]);

    // An attachment left out of the list is permanently gone.
    let shrunk = state
        .trip_service
        .reorder(user_id, trip_id, vec![attachment(d1, 1, 0)])
        .await
        .unwrap();
    assert_eq!(shrunk.destinations.len(), 1);
    assert_eq!(shrunk.destinations[0].destination_id, d1);

    // Empty list empties the trip.
    let emptied = state
        .trip_service
        .reorder(user_id, trip_id, vec![])
        .await
        .unwrap();
    assert!(emptied.destinations.is_empty());
}

#[tokio::test]
async fn reorder_with_current_set_is_idempotent() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_test_state(pool.clone(), "http://localhost:1");
    let user_id = test_helpers::insert_test_user(&pool, "a@x.com", "alice", "pw1234567", true)
        .await
        .unwrap();
    let d1 = test_helpers::insert_test_destination(&pool, "Temple", None)
        .await
        .unwrap();
    let d2 = test_helpers::insert_test_destination(&pool, "Beach", None)
        .await
        .unwrap();

    let trip = state
        .trip_service
        .create(
            user_id,
            trip_request(
                "Bali",
                date(2024, 1, 1),
                date(2024, 1, 3),
                vec![attachment(d1, 1, 0), attachment(d2, 2, 0)],
            ),
        )
        .await
        .unwrap();
    let trip_id = trip.trip.id;

    let current = vec![attachment(d1, 1, 0), attachment(d2, 2, 0)];

    let first = state
        .trip_service
        .reorder(user_id, trip_id, current.clone())
        .await
        .unwrap();
    let second = state
        .trip_service
        .reorder(user_id, trip_id, current)
        .await
        .unwrap();

    let positions = |r: &wayfarer::models::TripResponse| -> Vec<(i64, i64, i64)> {
        r.destinations
            .iter()
            .map(|a| (a.destination_id, a.day_number, a.sort_order))
            .collect()
    };

    assert_eq!(positions(&first), positions(&second));
    assert_eq!(
        positions(&second),
        vec![(d1, 1, 0), (d2, 2, 0)]
    );
}

#[tokio::test]
async fn delete_cascades_to_attachments() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_test_state(pool.clone(), "http://localhost:1");
    let user_id = test_helpers::insert_test_user(&pool, "a@x.com", "alice", "pw1234567", true)
        .await
        .unwrap();
    let d1 = test_helpers::insert_test_destination(&pool, "Temple", None)
        .await
        .unwrap();

    let trip = state
        .trip_service
        .create(
            user_id,
            trip_request(
                "Bali",
                date(2024, 1, 1),
                date(2024, 1, 3),
                vec![attachment(d1, 1, 0)],
            ),
        )
        .await
        .unwrap();
    let trip_id = trip.trip.id;

    state.trip_service.delete(user_id, trip_id).await.unwrap();

    let remaining: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM trip_destinations WHERE trip_id = ?")
            .bind(trip_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(remaining, 0);

    let get = state.trip_service.get(user_id, trip_id).await;
    assert!(matches!(get, Err(ApiError::NotFound(_))));
}
