//! HTTP tests for habits and habit logs.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, patch_json_auth, post_json, post_json_auth, put_json_auth,
    TEST_PASSWORD,
};
use sqlx::PgPool;

async fn create_habit(pool: &PgPool, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(common::build_test_app(pool.clone()), "/api/v1/habits", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn title_only_habit_is_created_without_quantity(pool: PgPool) {
    let token = common::signup(&pool, "h1@example.com").await;

    let habit = create_habit(&pool, &token, serde_json::json!({ "title": "  Meditate " })).await;
    assert_eq!(habit["title"], "Meditate");
    assert!(habit["unit"].is_null());
    assert!(habit["target"].is_null());
    assert_eq!(habit["frequency"]["kind"], "daily");
    assert_eq!(habit["is_archived"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn new_habit_takes_the_profile_zone_and_is_due_today(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/signup",
        serde_json::json!({
            "email": "tz@example.com",
            "password": TEST_PASSWORD,
            "timezone": "America/Sao_Paulo"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let token = body_json(response).await["access_token"].as_str().unwrap().to_string();

    let habit = create_habit(&pool, &token, serde_json::json!({ "title": "Stretch" })).await;
    assert_eq!(habit["timezone"], "America/Sao_Paulo");

    let response = get_auth(common::build_test_app(pool), "/api/v1/habits/today", &token).await;
    let json = body_json(response).await;
    let due: Vec<_> = json["data"].as_array().unwrap().iter().map(|h| h["id"].clone()).collect();
    assert_eq!(due, vec![habit["id"].clone()]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn habit_without_title_is_rejected(pool: PgPool) {
    let token = common::signup(&pool, "h2@example.com").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/habits",
        serde_json::json!({ "title": "   " }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let list = get_auth(common::build_test_app(pool), "/api/v1/habits", &token).await;
    assert_eq!(body_json(list).await["stats"]["total"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn patch_checks_quantity_against_stored_values(pool: PgPool) {
    let token = common::signup(&pool, "h3@example.com").await;
    let habit = create_habit(
        &pool,
        &token,
        serde_json::json!({ "title": "Water", "unit": "ml", "target": 2000.0 }),
    )
    .await;
    let uri = format!("/api/v1/habits/{}", habit["id"]);

    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "target": 2500.0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["target"], 2500.0);

    let response = patch_json_auth(
        common::build_test_app(pool),
        &uri,
        serde_json::json!({ "target": 0.5 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn other_users_habits_are_not_found(pool: PgPool) {
    let owner = common::signup(&pool, "owner@example.com").await;
    let intruder = common::signup(&pool, "intruder@example.com").await;
    let habit = create_habit(&pool, &owner, serde_json::json!({ "title": "Private" })).await;
    let uri = format!("/api/v1/habits/{}", habit["id"]);

    let response = get_auth(common::build_test_app(pool.clone()), &uri, &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(common::build_test_app(pool), &format!("{uri}?confirm=DELETAR"), &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_requires_exact_confirmation(pool: PgPool) {
    let token = common::signup(&pool, "h4@example.com").await;
    let habit = create_habit(&pool, &token, serde_json::json!({ "title": "Stretch" })).await;
    let uri = format!("/api/v1/habits/{}", habit["id"]);

    for confirm in ["", "deletar", "DELETAR%20"] {
        let response = delete_auth(
            common::build_test_app(pool.clone()),
            &format!("{uri}?confirm={confirm}"),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "confirm={confirm}");
    }
    let still_there = get_auth(common::build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(still_there.status(), StatusCode::OK);

    let response = delete_auth(common::build_test_app(pool.clone()), &format!("{uri}?confirm=DELETAR"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let gone = get_auth(common::build_test_app(pool), &uri, &token).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Archive and filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn archived_habits_are_filtered(pool: PgPool) {
    let token = common::signup(&pool, "h5@example.com").await;
    let kept = create_habit(&pool, &token, serde_json::json!({ "title": "Read" })).await;
    let archived = create_habit(&pool, &token, serde_json::json!({ "title": "Journal" })).await;

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/habits/{}/archive", archived["id"]),
        serde_json::json!({ "archived": true }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_archived"], true);

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/habits?status=active", &token).await;
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], kept["id"]);
    assert_eq!(json["stats"]["total"], 2);
    assert_eq!(json["stats"]["active"], 1);

    let response = get_auth(common::build_test_app(pool), "/api/v1/habits?search=JOUR", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["id"], archived["id"]);
}

// ---------------------------------------------------------------------------
// Logs and today view
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn logging_reaches_target_and_shows_in_today(pool: PgPool) {
    let token = common::signup(&pool, "h6@example.com").await;
    let habit = create_habit(
        &pool,
        &token,
        serde_json::json!({ "title": "Pages", "unit": "pages", "target": 10.0 }),
    )
    .await;
    let logs_uri = format!("/api/v1/habits/{}/logs", habit["id"]);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &logs_uri,
        serde_json::json!({ "value": 4.0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["progress"], 40.0);
    assert_eq!(json["data"]["done"], false);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &logs_uri,
        serde_json::json!({ "value": 12.0 }),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["progress"], 100.0);
    assert_eq!(json["data"]["done"], true);

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/habits/today", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let today = &json["data"][0];
    assert_eq!(today["id"], habit["id"]);
    assert_eq!(today["done"], true);
    assert_eq!(today["current_streak"], 1);
    assert_eq!(today["log"]["value"], 12.0);
    assert_eq!(json["stats"]["completed_today"], 1);

    let response = get_auth(common::build_test_app(pool), &logs_uri, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn negative_log_value_is_rejected(pool: PgPool) {
    let token = common::signup(&pool, "h7@example.com").await;
    let habit = create_habit(&pool, &token, serde_json::json!({ "title": "Run", "unit": "km", "target": 5.0 })).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/habits/{}/logs", habit["id"]),
        serde_json::json!({ "value": -1.0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inverted_log_range_is_rejected(pool: PgPool) {
    let token = common::signup(&pool, "h8@example.com").await;
    let habit = create_habit(&pool, &token, serde_json::json!({ "title": "Walk" })).await;

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/habits/{}/logs?from=2025-02-01&to=2025-01-01", habit["id"]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
