//! Best-score persistence that never interrupts a round.
//!
//! Every backend failure and every unreadable payload is logged and converted
//! into either the zero record or a no-op at this boundary.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::dao::{models::BestRecord, progress_store::KeyValueStore};

/// Default slot name holding the serialized [`BestRecord`].
pub const DEFAULT_STORAGE_KEY: &str = "trivia_best";

/// Reads and writes the best-score record in a single key-value slot.
#[derive(Clone)]
pub struct ProgressStore {
    backend: Arc<dyn KeyValueStore>,
    key: Arc<str>,
}

impl ProgressStore {
    /// Wrap `backend`, storing the record under `key`.
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<Arc<str>>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Load the stored record, or the zero record when absent or unreadable.
    pub async fn load(&self) -> BestRecord {
        let raw = match self.backend.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return BestRecord::default(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "best record unavailable; using zero record");
                return BestRecord::default();
            }
        };

        match parse_record(&raw) {
            Ok(record) => record,
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored best record is corrupt; using zero record");
                BestRecord::default()
            }
        }
    }

    /// Persist `record`; failures are logged and dropped.
    pub async fn save(&self, record: &BestRecord) {
        let payload = match serde_json::to_string(record) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "failed to serialize best record");
                return;
            }
        };

        if let Err(err) = self.backend.set(&self.key, payload).await {
            warn!(key = %self.key, error = %err, "failed to persist best record");
        }
    }

    /// Remove the stored record; later loads yield the zero record.
    pub async fn clear(&self) {
        if let Err(err) = self.backend.remove(&self.key).await {
            warn!(key = %self.key, error = %err, "failed to clear best record");
        }
    }

    /// Fold a completed round into the stored record and persist the result.
    pub async fn record_completion(&self, score: u32, total: u32) -> BestRecord {
        let previous = self.load().await;
        let updated = previous.with_completion(score, total);
        debug!(?previous, ?updated, "recording completed round");
        self.save(&updated).await;
        updated
    }
}

/// Decode a stored payload, accepting only JSON objects.
fn parse_record(raw: &str) -> Result<BestRecord, serde_json::Error> {
    let value = serde_json::from_str::<Value>(raw)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("best record is not a JSON object"));
    }
    serde_json::from_value(value)
}
