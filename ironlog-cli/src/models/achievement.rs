use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub achieved_at: Option<DateTime<Utc>>,
    /// Fraction of the way to unlocking, 0.0 to 1.0
    #[serde(default)]
    pub progress: f64,
}

impl Achievement {
    pub fn is_unlocked(&self) -> bool {
        self.achieved_at.is_some()
    }

    /// Progress as a whole percentage, clamped to 0..=100
    pub fn progress_percentage(&self) -> u8 {
        if self.is_unlocked() {
            return 100;
        }
        (self.progress.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}
