//! HTTP handlers for the prediction API

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::formula;
use crate::server::error::ApiError;
use crate::server::ServerState;
use crate::types::{self, Scenario};

/// How many records /api/history serves.
const HISTORY_LIMIT: usize = 12;

/// Prediction response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub comfort_score: f64,
    pub predicted_units: f64,
    pub predicted_cost: f64,
    pub advice: &'static str,
}

/// One history point for charting
#[derive(Debug, Serialize)]
pub struct HistoryPoint {
    pub comfort_score: f64,
    pub predicted_cost: f64,
    pub created_at: String,
}

/// Liveness handler
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "service": "ghostlab" }))
}

/// Static scenario templates
pub async fn presets_handler() -> Json<serde_json::Value> {
    Json(json!({ "presets": types::presets() }))
}

/// Predict handler: validate, compute, persist, respond.
///
/// The insert happens only after computation succeeds, so a request either
/// fully computes and fully persists or fails before any side effect.
pub async fn predict_handler(
    State(state): State<ServerState>,
    Json(scenario): Json<Scenario>,
) -> Result<Json<PredictResponse>, ApiError> {
    scenario.validate()?;

    let prediction = formula::compute(&scenario);
    let created_at = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    state.store.insert(&scenario, &prediction, &created_at).await?;

    Ok(Json(PredictResponse {
        comfort_score: formula::round1(prediction.comfort_score),
        predicted_units: prediction.predicted_units,
        predicted_cost: prediction.predicted_cost,
        advice: prediction.advice,
    }))
}

/// History handler: the most recent predictions, oldest first
pub async fn history_handler(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let records = state.store.recent(HISTORY_LIMIT).await?;

    let points: Vec<HistoryPoint> = records
        .into_iter()
        .map(|record| HistoryPoint {
            comfort_score: record.comfort_score,
            predicted_cost: record.predicted_cost,
            created_at: record.created_at,
        })
        .collect();

    Ok(Json(json!({ "points": points })))
}
