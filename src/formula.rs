//! Closed-form comfort and energy model
//!
//! A pure mapping from a validated scenario to a comfort score, predicted
//! energy units, predicted cost, and a one-line advice string. Deterministic,
//! no side effects, no error conditions.

use serde::Serialize;

use crate::types::Scenario;

/// Cost per predicted energy unit.
const UNIT_TARIFF: f64 = 8.4;

/// Cost threshold above which the advice switches to cost reduction.
const ADVICE_COST_THRESHOLD: f64 = 10.0;

/// Output of one model evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// Clamped to [0, 100], unrounded. The stored value is this one;
    /// rounding to 1 decimal happens at the response boundary.
    pub comfort_score: f64,
    /// Predicted energy consumption, rounded to 2 decimals, >= 0.
    pub predicted_units: f64,
    /// Predicted cost (`predicted_units` x tariff), rounded to 2 decimals.
    pub predicted_cost: f64,
    /// One-line suggestion based on the predicted cost.
    pub advice: &'static str,
}

/// Evaluate the model for a validated scenario.
pub fn compute(s: &Scenario) -> Prediction {
    let thermal_penalty = (s.room_temp - 24.0).abs() * 2.4 + (s.humidity - 50.0).abs() * 0.35;
    let airflow_bonus = s.fan_speed as f64 * 1.5;
    let occupancy_penalty = s.occupancy as f64 * 1.3;

    let comfort_score =
        (92.0 - thermal_penalty + airflow_bonus - occupancy_penalty).clamp(0.0, 100.0);

    // AC only draws when the room is above the setpoint.
    let ac_load = ((s.room_temp - s.ac_setpoint) * 0.16).max(0.0);
    let fan_load = s.fan_speed as f64 * 0.06;
    let light_load = s.lights as f64 * 0.04;
    let occupant_load = s.occupancy as f64 * 0.03;

    let predicted_units = round2(ac_load + fan_load + light_load + occupant_load);
    let predicted_cost = round2(predicted_units * UNIT_TARIFF);

    let advice = if predicted_cost > ADVICE_COST_THRESHOLD {
        "Reduce AC delta and lights for lower cost."
    } else {
        "Comfort-cost balance is healthy."
    };

    Prediction {
        comfort_score,
        predicted_units,
        predicted_cost,
        advice,
    }
}

/// Round to 2 decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Round to 1 decimal place.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
