//! Ranked history of finished games.
//!
//! The engine never writes here; the front end records a game's final score
//! when it ends or when a game in progress is abandoned by a restart. Storage
//! beyond the process lifetime is left to whoever owns the history.

use serde::{Deserialize, Serialize};

/// One row of the ranking table (places are 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankedScore {
    pub place: usize,
    pub score: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreHistory {
    /// Recorded scores in arrival order
    scores: Vec<u64>,
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished game. Zero scores are not worth a row.
    pub fn record(&mut self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        self.scores.push(score);
        true
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn best(&self) -> Option<u64> {
        self.scores.iter().copied().max()
    }

    /// All scores, highest first. Ties keep arrival order.
    pub fn ranked(&self) -> Vec<RankedScore> {
        let mut sorted = self.scores.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        sorted
            .into_iter()
            .enumerate()
            .map(|(i, score)| RankedScore {
                place: i + 1,
                score,
            })
            .collect()
    }

    pub fn top(&self, n: usize) -> Vec<RankedScore> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}
