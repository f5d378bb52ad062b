//! SQLite-backed persistence for prediction history
//!
//! Append-only: records are written once per successful predict call and
//! never updated or deleted.

use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::formula::Prediction;
use crate::types::Scenario;

/// The underlying medium was unreachable or a write failed. Surfaced to
/// callers as HTTP 500; not retried.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One persisted prediction, immutable once written.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRecord {
    pub id: i64,
    pub room_temp: f64,
    pub humidity: f64,
    pub occupancy: i64,
    pub fan_speed: i64,
    pub ac_setpoint: f64,
    pub lights: i64,
    /// The clamped, unrounded comfort score.
    pub comfort_score: f64,
    pub predicted_units: f64,
    pub predicted_cost: f64,
    /// UTC, second precision, ISO-8601 with trailing "Z".
    pub created_at: String,
}

/// Append-only store of prediction records.
#[derive(Clone)]
pub struct PredictionStore {
    conn: Arc<Mutex<Connection>>,
}

impl PredictionStore {
    /// Open (or create) the store at the given path.
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let conn = Connection::open(&path)?;

        // Enable WAL mode for better performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Initialize the schema. Idempotent; safe to run on every start.
    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS simulations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                room_temp REAL NOT NULL,
                humidity REAL NOT NULL,
                occupancy INTEGER NOT NULL,
                fan_speed INTEGER NOT NULL,
                ac_setpoint REAL NOT NULL,
                lights INTEGER NOT NULL,
                comfort_score REAL NOT NULL,
                predicted_units REAL NOT NULL,
                predicted_cost REAL NOT NULL,
                created_at TEXT NOT NULL
            );
        "#,
        )?;

        Ok(())
    }

    /// Append one record. The comfort score persisted here is the clamped,
    /// unrounded value.
    pub async fn insert(
        &self,
        scenario: &Scenario,
        prediction: &Prediction,
        created_at: &str,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;

        conn.execute(
            r#"INSERT INTO simulations
               (room_temp, humidity, occupancy, fan_speed, ac_setpoint, lights,
                comfort_score, predicted_units, predicted_cost, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"#,
            params![
                scenario.room_temp,
                scenario.humidity,
                scenario.occupancy,
                scenario.fan_speed,
                scenario.ac_setpoint,
                scenario.lights,
                prediction.comfort_score,
                prediction.predicted_units,
                prediction.predicted_cost,
                created_at,
            ],
        )?;

        Ok(())
    }

    /// Up to `limit` most recent records, oldest of the window first.
    ///
    /// The natural fetch order is newest-first; the window is reversed
    /// before returning so history plots left-to-right in time.
    pub async fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>, StoreError> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare_cached(
            r#"SELECT id, room_temp, humidity, occupancy, fan_speed, ac_setpoint, lights,
                      comfort_score, predicted_units, predicted_cost, created_at
               FROM simulations
               ORDER BY id DESC
               LIMIT ?1"#,
        )?;

        let mut records = stmt
            .query_map(params![limit], |row| {
                Ok(PredictionRecord {
                    id: row.get(0)?,
                    room_temp: row.get(1)?,
                    humidity: row.get(2)?,
                    occupancy: row.get(3)?,
                    fan_speed: row.get(4)?,
                    ac_setpoint: row.get(5)?,
                    lights: row.get(6)?,
                    comfort_score: row.get(7)?,
                    predicted_units: row.get(8)?,
                    predicted_cost: row.get(9)?,
                    created_at: row.get(10)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        records.reverse();
        Ok(records)
    }

    /// Total number of stored predictions.
    pub async fn count(&self) -> Result<usize, StoreError> {
        let conn = self.conn.lock().await;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM simulations", [], |row| row.get(0))?;

        Ok(count as usize)
    }
}
