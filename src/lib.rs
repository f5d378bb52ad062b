//! GhostLab - Room Comfort & Energy Prediction Service
//!
//! A small HTTP service that:
//! - Scores occupant comfort for a simulated room scenario
//! - Predicts energy units and cost from a closed-form model
//! - Persists every prediction to SQLite and serves recent history

pub mod types;
pub mod formula;
pub mod store;
pub mod config;
pub mod server;
pub mod cli;

// Re-export commonly used types for convenience
pub use config::Config;
pub use formula::{compute, Prediction};
pub use store::{PredictionRecord, PredictionStore};
pub use types::{presets, Preset, Scenario};

pub use server::{start as start_server, ServerState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
