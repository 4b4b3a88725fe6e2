//! Active-workout interaction state: set entry and the rest timer.

mod clock;
mod rest_timer;
mod set_entry;

use chrono::Duration;
use thiserror::Error;

use crate::models::ValidationError;

pub use clock::{Clock, ManualClock, SystemClock};
pub use rest_timer::RestTimer;
pub use set_entry::{SetEntry, SetEntryState};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// `M:SS`, or `H:MM:SS` past the hour
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
