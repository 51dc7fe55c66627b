use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::Row;
use tower::ServiceExt;
use wayfarer::test_utils::test_helpers;

async fn test_router(pool: sqlx::SqlitePool) -> Router {
    wayfarer::build_router(test_helpers::build_test_state(pool, "http://localhost:1"))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn healthz_returns_fixed_payload() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let app = test_router(pool).await;

    let response = app
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn protected_routes_reject_missing_and_garbage_tokens() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let app = test_router(pool).await;

    let missing = app
        .clone()
        .oneshot(Request::get("/api/v1/trips").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .oneshot(
            Request::get("/api/v1/trips")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn end_to_end_register_verify_login_trip_reorder() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let app = test_router(pool.clone()).await;

    // Register: user starts inactive.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            json!({ "email": "a@x.com", "username": "alice", "password": "pw1234567" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let registered = response_json(response).await;
    assert_eq!(registered["is_active"], false);

    // Login before verification is rejected with the unverified message.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            json!({ "email": "a@x.com", "password": "pw1234567" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("verify your email"));

    // Verify with the issued token.
    let token: String = sqlx::query("SELECT verification_token FROM users WHERE email = ?")
        .bind("a@x.com")
        .fetch_one(&pool)
        .await
        .unwrap()
        .get(0);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/verify-email",
            json!({ "email": "a@x.com", "token": token }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Login now succeeds with a bearer token.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            json!({ "email": "a@x.com", "password": "pw1234567" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let login = response_json(response).await;
    let access_token = login["access_token"].as_str().unwrap().to_string();
    assert_eq!(login["token_type"], "bearer");

    // /auth/me resolves the token.
    let response = app
        .clone()
        .oneshot(
            Request::get("/api/v1/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {access_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me = response_json(response).await;
    assert_eq!(me["email"], "a@x.com");
    assert_eq!(me["is_active"], true);

    // Create a trip with one attachment.
    let destination_id = test_helpers::insert_test_destination(&pool, "Uluwatu Temple", None)
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/v1/trips",
            &access_token,
            json!({
                "title": "Bali",
                "start_date": "2024-01-01",
                "end_date": "2024-01-03",
                "destinations": [
                    { "destination_id": destination_id, "day_number": 1, "order": 0 }
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let trip = response_json(response).await;
    let trip_id = trip["id"].as_i64().unwrap();
    assert_eq!(trip["destinations"].as_array().unwrap().len(), 1);
    assert_eq!(trip["destinations"][0]["order"], 0);

    // Reorder with an empty list leaves zero attachments.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/v1/trips/{trip_id}/reorder"),
            &access_token,
            json!([]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let reordered = response_json(response).await;
    assert_eq!(reordered["destinations"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn trip_create_with_reversed_dates_is_a_bad_request() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let app = test_router(pool.clone()).await;

    test_helpers::insert_test_user(&pool, "a@x.com", "alice", "pw1234567", true)
        .await
        .unwrap();

    let login = response_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/auth/login",
                json!({ "email": "a@x.com", "password": "pw1234567" }),
            ))
            .await
            .unwrap(),
    )
    .await;
    let token = login["access_token"].as_str().unwrap();

    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/v1/trips",
            token,
            json!({
                "title": "Backwards",
                "start_date": "2024-01-03",
                "end_date": "2024-01-01"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("End date"));
}

#[tokio::test]
async fn review_with_out_of_range_rating_is_a_bad_request() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let app = test_router(pool.clone()).await;

    test_helpers::insert_test_user(&pool, "a@x.com", "alice", "pw1234567", true)
        .await
        .unwrap();

    let login = response_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/auth/login",
                json!({ "email": "a@x.com", "password": "pw1234567" }),
            ))
            .await
            .unwrap(),
    )
    .await;
    let token = login["access_token"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/v1/reviews",
            token,
            json!({ "destination_id": 1, "rating": 6 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Reviews for a destination are publicly listable.
    let destination_id = test_helpers::insert_test_destination(&pool, "Temple", None)
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/v1/reviews",
            token,
            json!({ "destination_id": destination_id, "rating": 5, "comment": "Stunning" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::get(format!("/api/v1/reviews/destination/{destination_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let reviews = response_json(response).await;
    assert_eq!(reviews.as_array().unwrap().len(), 1);
    assert_eq!(reviews[0]["rating"], 5);
}

#[tokio::test]
async fn admin_destination_create_requires_superuser() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let app = test_router(pool.clone()).await;

    let user_id = test_helpers::insert_test_user(&pool, "a@x.com", "alice", "pw1234567", true)
        .await
        .unwrap();

    let login = response_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/auth/login",
                json!({ "email": "a@x.com", "password": "pw1234567" }),
            ))
            .await
            .unwrap(),
    )
    .await;
    let token = login["access_token"].as_str().unwrap().to_string();

    let payload = json!({ "name": "Ubud", "country": "Indonesia", "city": "Ubud" });

    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/v1/destinations",
            &token,
            payload.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    test_helpers::make_superuser(&pool, user_id).await.unwrap();

    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/v1/destinations",
            &token,
            payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn contact_form_validates_and_acknowledges() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let app = test_router(pool).await;

    let bad_email = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/contact",
            json!({ "name": "Alice", "email": "no", "subject": "Hi", "message": "Hello" }),
        ))
        .await
        .unwrap();
    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);

    let ok = app
        .oneshot(json_request(
            "POST",
            "/api/v1/contact",
            json!({
                "name": "Alice",
                "email": "a@x.com",
                "subject": "Planning help",
                "message": "Hello there"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    let body = response_json(ok).await;
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn i18n_endpoints_serve_static_tables() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let app = test_router(pool).await;

    let locales = app
        .clone()
        .oneshot(
            Request::get("/api/v1/i18n/locales")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(locales.status(), StatusCode::OK);
    let body = response_json(locales).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let translations = app
        .clone()
        .oneshot(
            Request::get("/api/v1/i18n/translations/id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(translations.status(), StatusCode::OK);
    let body = response_json(translations).await;
    assert_eq!(body["translations"]["common"]["search"], "Cari");

    let unknown = app
        .oneshot(
            Request::get("/api/v1/i18n/translations/fr")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_destination_returns_not_found() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let app = test_router(pool).await;

    let response = app
        .oneshot(
            Request::get("/api/v1/destinations/4242")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
