//! Records persisted in the local key-value store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest-scoring completed round plus a lifetime attempt counter.
///
/// Stored as camelCase JSON so records written by earlier clients stay readable.
/// Missing fields decode as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BestRecord {
    /// Score of the best completed round.
    pub best_score: u32,
    /// Number of questions in the best completed round; zero until a round completes.
    pub best_total: u32,
    /// Number of completed rounds.
    pub attempts: u32,
}

impl BestRecord {
    /// Whether at least one round has been completed.
    pub fn has_best(&self) -> bool {
        self.best_total > 0
    }

    /// Fold a completed round into the record.
    ///
    /// The best is replaced when no round completed before or when `score`
    /// strictly beats the stored best. `attempts` always goes up by one.
    pub fn with_completion(self, score: u32, total: u32) -> Self {
        let attempts = self.attempts.saturating_add(1);
        if !self.has_best() || score > self.best_score {
            Self {
                best_score: score,
                best_total: total,
                attempts,
            }
        } else {
            Self { attempts, ..self }
        }
    }
}

impl fmt::Display for BestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_best() {
            write!(
                f,
                "Best score: {}/{} • Attempts: {}",
                self.best_score, self.best_total, self.attempts
            )
        } else {
            write!(f, "Best score: none yet • Attempts: {}", self.attempts)
        }
    }
}
