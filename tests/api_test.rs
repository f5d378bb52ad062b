//! Integration tests for the prediction API
//!
//! Drives the full router in-process with `tower::ServiceExt::oneshot`
//! against a temporary database per test.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use ghostlab::config::Config;
use ghostlab::formula;
use ghostlab::server::{router, ServerState};
use ghostlab::store::PredictionStore;
use ghostlab::types::Scenario;

/// Build a router backed by a fresh temporary database.
///
/// The TempDir must stay alive for the duration of the test.
async fn test_app() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = PredictionStore::new(dir.path().join("ghostlab.db"))
        .await
        .unwrap();

    let state = ServerState {
        config: Arc::new(Config::default()),
        store,
    };

    (router(state), dir)
}

async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

async fn post_predict(app: &Router, body: Value) -> (StatusCode, Option<Value>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/predict")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    // Extractor rejections produce plain-text bodies.
    let value = serde_json::from_slice(&bytes).ok();
    (status, value)
}

fn scenario_json(room_temp: f64) -> Value {
    json!({
        "room_temp": room_temp,
        "humidity": 62,
        "occupancy": 2,
        "fan_speed": 4,
        "ac_setpoint": 23,
        "lights": 3,
    })
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = test_app().await;

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "service": "ghostlab" }));
}

#[tokio::test]
async fn test_presets() {
    let (app, _dir) = test_app().await;

    let (status, body) = get(&app, "/api/presets").await;
    assert_eq!(status, StatusCode::OK);

    let presets = body["presets"].as_array().unwrap();
    assert_eq!(presets.len(), 3);
    assert_eq!(presets[0]["name"], "Exam Night");
    assert_eq!(presets[1]["name"], "Sleep Mode");
    assert_eq!(presets[2]["name"], "Group Study");

    for preset in presets {
        for field in [
            "room_temp",
            "humidity",
            "occupancy",
            "fan_speed",
            "ac_setpoint",
            "lights",
        ] {
            assert!(preset.get(field).is_some(), "preset missing {}", field);
        }
    }
}

#[tokio::test]
async fn test_predict_worked_example() {
    let (app, _dir) = test_app().await;

    let (status, body) = post_predict(&app, scenario_json(31.0)).await;
    assert_eq!(status, StatusCode::OK);

    let body = body.unwrap();
    assert_eq!(body["comfort_score"].as_f64().unwrap(), 74.4);
    assert_eq!(body["predicted_units"].as_f64().unwrap(), 1.7);
    assert_eq!(body["predicted_cost"].as_f64().unwrap(), 14.28);
    assert_eq!(body["advice"], "Reduce AC delta and lights for lower cost.");
}

#[tokio::test]
async fn test_predict_healthy_advice() {
    let (app, _dir) = test_app().await;

    let (status, body) = post_predict(
        &app,
        json!({
            "room_temp": 24,
            "humidity": 50,
            "occupancy": 1,
            "fan_speed": 1,
            "ac_setpoint": 24,
            "lights": 1,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body = body.unwrap();
    assert!(body["predicted_cost"].as_f64().unwrap() <= 10.0);
    assert_eq!(body["advice"], "Comfort-cost balance is healthy.");
}

#[tokio::test]
async fn test_predict_rejects_out_of_range() {
    let (app, _dir) = test_app().await;

    let (status, body) = post_predict(&app, scenario_json(5.0)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.unwrap()["field"], "room_temp");

    let mut too_crowded = scenario_json(31.0);
    too_crowded["occupancy"] = json!(7);
    let (status, body) = post_predict(&app, too_crowded).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.unwrap()["field"], "occupancy");
}

#[tokio::test]
async fn test_predict_rejects_malformed_body() {
    let (app, _dir) = test_app().await;

    // Missing field
    let (status, _) = post_predict(
        &app,
        json!({ "room_temp": 31, "humidity": 62 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Wrong type
    let mut wrong_type = scenario_json(31.0);
    wrong_type["room_temp"] = json!("hot");
    let (status, _) = post_predict(&app, wrong_type).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_rejected_predict_persists_nothing() {
    let (app, _dir) = test_app().await;

    let (status, _) = post_predict(&app, scenario_json(5.0)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = get(&app, "/api/history").await;
    assert!(body["points"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_history_reads_are_idempotent() {
    let (app, _dir) = test_app().await;

    post_predict(&app, scenario_json(31.0)).await;
    post_predict(&app, scenario_json(28.0)).await;

    let (status, first) = get(&app, "/api/history").await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = get(&app, "/api/history").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_history_window_is_last_12_chronological() {
    let (app, _dir) = test_app().await;

    // 15 predicts at distinct temperatures 20..34
    for i in 0..15 {
        let (status, _) = post_predict(&app, scenario_json(20.0 + i as f64)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = get(&app, "/api/history").await;
    assert_eq!(status, StatusCode::OK);

    let points = body["points"].as_array().unwrap();
    assert_eq!(points.len(), 12);

    // Oldest of the window first: inserts 3..=14, temps 23..=34.
    for (offset, point) in points.iter().enumerate() {
        let scenario = Scenario {
            room_temp: 23.0 + offset as f64,
            humidity: 62.0,
            occupancy: 2,
            fan_speed: 4,
            ac_setpoint: 23.0,
            lights: 3,
        };
        let expected = formula::compute(&scenario);
        assert_eq!(point["comfort_score"].as_f64().unwrap(), expected.comfort_score);
        assert_eq!(point["predicted_cost"].as_f64().unwrap(), expected.predicted_cost);
    }

    // Timestamps never go backwards across the window.
    for pair in points.windows(2) {
        let earlier = pair[0]["created_at"].as_str().unwrap();
        let later = pair[1]["created_at"].as_str().unwrap();
        assert!(earlier <= later);
    }
}

#[tokio::test]
async fn test_history_serves_unrounded_scores() {
    let (app, _dir) = test_app().await;

    // comfort = 92 - (7.1*2.4 + 12*0.35) + 6.0 - 2.6 = 74.16;
    // the response rounds to 74.2, history keeps the stored value.
    let (_, predict_body) = post_predict(&app, scenario_json(31.1)).await;
    assert_eq!(predict_body.unwrap()["comfort_score"].as_f64().unwrap(), 74.2);

    let (_, history_body) = get(&app, "/api/history").await;
    let points = history_body["points"].as_array().unwrap();
    assert_eq!(points.len(), 1);

    let expected = formula::compute(&Scenario {
        room_temp: 31.1,
        humidity: 62.0,
        occupancy: 2,
        fan_speed: 4,
        ac_setpoint: 23.0,
        lights: 3,
    });
    assert_eq!(
        points[0]["comfort_score"].as_f64().unwrap(),
        expected.comfort_score
    );
}

#[tokio::test]
async fn test_created_at_format() {
    let (app, _dir) = test_app().await;

    post_predict(&app, scenario_json(31.0)).await;

    let (_, body) = get(&app, "/api/history").await;
    let created_at = body["points"][0]["created_at"].as_str().unwrap();

    // ISO-8601, second precision, trailing Z: 2026-08-08T10:00:00Z
    assert_eq!(created_at.len(), 20);
    assert!(created_at.ends_with('Z'));
    assert_eq!(&created_at[4..5], "-");
    assert_eq!(&created_at[10..11], "T");
}
