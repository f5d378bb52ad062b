//! Shared types used across modules
//!
//! The scenario input, its range validation, and the static presets
//! exposed by the API.

use serde::{Deserialize, Serialize};

/// A room-environment scenario submitted for one prediction.
///
/// All fields must fall within their inclusive ranges; `validate` rejects
/// anything outside before domain logic runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Scenario {
    /// Room temperature in Celsius (10-50)
    pub room_temp: f64,
    /// Relative humidity percent (0-100)
    pub humidity: f64,
    /// Number of occupants (0-6)
    pub occupancy: i64,
    /// Fan speed setting (0-5)
    pub fan_speed: i64,
    /// AC setpoint in Celsius (16-30)
    pub ac_setpoint: f64,
    /// Lights switched on (0-8)
    pub lights: i64,
}

/// A field fell outside its declared range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} must be between {min} and {max}, got {value}")]
pub struct ValidationError {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
    pub value: f64,
}

impl Scenario {
    /// Check every field against its inclusive range, reporting the first
    /// violation with field-level detail.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("room_temp", self.room_temp, 10.0, 50.0)?;
        check_range("humidity", self.humidity, 0.0, 100.0)?;
        check_range("occupancy", self.occupancy as f64, 0.0, 6.0)?;
        check_range("fan_speed", self.fan_speed as f64, 0.0, 5.0)?;
        check_range("ac_setpoint", self.ac_setpoint, 16.0, 30.0)?;
        check_range("lights", self.lights as f64, 0.0, 8.0)?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError { field, min, max, value });
    }
    Ok(())
}

/// A named scenario template, read-only and never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Preset {
    pub name: &'static str,
    #[serde(flatten)]
    pub scenario: Scenario,
}

/// The three built-in presets exposed by `/api/presets`.
pub fn presets() -> Vec<Preset> {
    vec![
        Preset {
            name: "Exam Night",
            scenario: Scenario {
                room_temp: 31.0,
                humidity: 62.0,
                occupancy: 2,
                fan_speed: 4,
                ac_setpoint: 23.0,
                lights: 3,
            },
        },
        Preset {
            name: "Sleep Mode",
            scenario: Scenario {
                room_temp: 28.0,
                humidity: 54.0,
                occupancy: 1,
                fan_speed: 2,
                ac_setpoint: 25.0,
                lights: 1,
            },
        },
        Preset {
            name: "Group Study",
            scenario: Scenario {
                room_temp: 33.0,
                humidity: 65.0,
                occupancy: 4,
                fan_speed: 5,
                ac_setpoint: 22.0,
                lights: 5,
            },
        },
    ]
}
