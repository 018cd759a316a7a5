//! Change events turning into snapshots for subscribed sockets.

mod common;

use std::sync::Arc;

use axum::extract::ws::Message;
use common::{body_json, post_json_auth};
use habitsgoals_api::sync::snapshot::load_snapshot;
use habitsgoals_api::sync::SnapshotPublisher;
use habitsgoals_api::ws::WsManager;
use habitsgoals_db::repositories::UserRepo;
use habitsgoals_events::{ChangeEvent, Collection, EventBus};
use sqlx::PgPool;

async fn user_id(pool: &PgPool, email: &str) -> i64 {
    UserRepo::find_by_email(pool, email).await.unwrap().unwrap().id
}

fn snapshot_json(message: Message) -> serde_json::Value {
    match message {
        Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
        other => panic!("expected a text frame, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn snapshot_is_newest_first_and_scoped(pool: PgPool) {
    let token = common::signup(&pool, "s1@example.com").await;
    let other = common::signup(&pool, "s2@example.com").await;
    for (title, token) in [("First", &token), ("Second", &token), ("Foreign", &other)] {
        post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/tasks",
            serde_json::json!({ "title": title }),
            token,
        )
        .await;
    }

    let id = user_id(&pool, "s1@example.com").await;
    let data = load_snapshot(&pool, id, Collection::Tasks, chrono_tz::UTC).await.unwrap();
    let titles: Vec<_> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);

    let profile = load_snapshot(&pool, id, Collection::Profile, chrono_tz::UTC).await.unwrap();
    assert_eq!(profile["email"], "s1@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn publisher_pushes_to_subscribers(pool: PgPool) {
    let token = common::signup(&pool, "s3@example.com").await;
    let id = user_id(&pool, "s3@example.com").await;
    let created = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/habits",
        serde_json::json!({ "title": "Sync me" }),
        &token,
    )
    .await;
    let habit_id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let ws_manager = Arc::new(WsManager::new());
    let mut rx = ws_manager.add("sock".to_string(), id).await;
    ws_manager.subscribe("sock", Collection::Habits).await;

    let publisher = SnapshotPublisher::new(pool, Arc::clone(&ws_manager), chrono_tz::UTC);
    publisher
        .publish(&ChangeEvent::created(Collection::Habits, id, habit_id))
        .await;

    let json = snapshot_json(rx.recv().await.unwrap());
    assert_eq!(json["type"], "snapshot");
    assert_eq!(json["collection"], "habits");
    assert_eq!(json["data"][0]["title"], "Sync me");

    // Nobody listens to tasks: nothing is sent.
    publisher
        .publish(&ChangeEvent::created(Collection::Tasks, id, 1))
        .await;
    assert!(rx.try_recv().is_err());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn publisher_stops_when_bus_is_dropped(pool: PgPool) {
    let bus = EventBus::default();
    let publisher = SnapshotPublisher::new(pool, Arc::new(WsManager::new()), chrono_tz::UTC);
    let handle = tokio::spawn(publisher.run(bus.subscribe()));

    drop(bus);

    tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("publisher should stop")
        .unwrap();
}
