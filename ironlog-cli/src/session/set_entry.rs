use chrono::{DateTime, Duration, Utc};

use super::SessionError;
use crate::models::{validate_set, NewSet, ValidationLimits};

/// Where the user is in entering the current set
#[derive(Debug, Clone, PartialEq)]
pub enum SetEntryState {
    Idle,
    TimingUnderTension { started_at: DateTime<Utc> },
    Stopped { under_tension: Duration },
    Submitted(NewSet),
}

impl SetEntryState {
    fn name(&self) -> &'static str {
        match self {
            SetEntryState::Idle => "idle",
            SetEntryState::TimingUnderTension { .. } => "timing",
            SetEntryState::Stopped { .. } => "stopped",
            SetEntryState::Submitted(_) => "submitted",
        }
    }
}

/// Button-driven set entry: idle -> timing under tension -> stopped -> submitted.
///
/// Submitting straight from idle logs a set without a tension time.
/// Starting again after a submission begins the next set.
#[derive(Debug, Clone)]
pub struct SetEntry {
    state: SetEntryState,
    is_warmup: bool,
}

impl Default for SetEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl SetEntry {
    pub fn new() -> Self {
        Self {
            state: SetEntryState::Idle,
            is_warmup: false,
        }
    }

    pub fn state(&self) -> &SetEntryState {
        &self.state
    }

    pub fn set_warmup(&mut self, is_warmup: bool) {
        self.is_warmup = is_warmup;
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            from: self.state.name(),
            action,
        }
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        match self.state {
            SetEntryState::Idle | SetEntryState::Submitted(_) => {
                self.state = SetEntryState::TimingUnderTension { started_at: now };
                Ok(())
            }
            _ => Err(self.invalid("start")),
        }
    }

    /// Stop the tension timer, returning the measured time
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<Duration, SessionError> {
        match self.state {
            SetEntryState::TimingUnderTension { started_at } => {
                let under_tension = (now - started_at).max(Duration::zero());
                self.state = SetEntryState::Stopped { under_tension };
                Ok(under_tension)
            }
            _ => Err(self.invalid("stop")),
        }
    }

    /// Validate and produce the set to send. On validation failure the
    /// state is left as it was so the user can correct the input.
    pub fn submit(
        &mut self,
        weight_kg: f64,
        reps: u32,
        rest_seconds: Option<u32>,
        limits: &ValidationLimits,
    ) -> Result<NewSet, SessionError> {
        let under_tension = match self.state {
            SetEntryState::Stopped { under_tension } => Some(under_tension),
            SetEntryState::Idle => None,
            _ => return Err(self.invalid("submit")),
        };

        let mut set = NewSet {
            weight_kg,
            reps,
            rest_seconds,
            is_warmup: self.is_warmup,
            time_under_tension_seconds: under_tension
                .map(|d| u32::try_from(d.num_seconds()).unwrap_or(u32::MAX)),
        };

        validate_set(&mut set, limits)?;

        self.state = SetEntryState::Submitted(set.clone());
        Ok(set)
    }

    pub fn reset(&mut self) {
        self.state = SetEntryState::Idle;
    }

    /// Time under tension so far, if the timer is running
    pub fn running_for(&self, now: DateTime<Utc>) -> Option<Duration> {
        match self.state {
            SetEntryState::TimingUnderTension { started_at } => Some(now - started_at),
            _ => None,
        }
    }
}
