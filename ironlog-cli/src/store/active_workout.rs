use chrono::Duration;
use std::sync::Arc;
use tokio::sync::watch;

use crate::models::Workout;
use crate::session::{format_duration, Clock, RestTimer};

/// Timer state of the workout being performed
#[derive(Debug, Clone)]
pub struct ActiveWorkoutState {
    pub workout_id: i64,
    pub name: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub rest: RestTimer,
    pub sets_logged: usize,
}

pub struct ActiveWorkoutStore {
    state: watch::Sender<Option<ActiveWorkoutState>>,
    clock: Arc<dyn Clock>,
    default_rest_seconds: u64,
}

impl ActiveWorkoutStore {
    pub fn new(clock: Arc<dyn Clock>, default_rest_seconds: u64) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            state,
            clock,
            default_rest_seconds,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ActiveWorkoutState>> {
        self.state.subscribe()
    }

    pub fn current(&self) -> Option<ActiveWorkoutState> {
        self.state.borrow().clone()
    }

    /// Track a workout; the rest timer resumes from its last completed set
    pub fn begin(&self, workout: &Workout) {
        let last_set = workout
            .exercises
            .iter()
            .filter_map(|e| e.last_completed_at())
            .max();

        tracing::debug!("Tracking workout {} (last set {:?})", workout.id, last_set);

        self.state.send_replace(Some(ActiveWorkoutState {
            workout_id: workout.id,
            name: workout.name.clone(),
            started_at: workout.started_at,
            rest: RestTimer::new(self.default_rest_seconds).with_last_set(last_set),
            sets_logged: workout.total_sets(),
        }));
    }

    /// Record a finished set and restart the rest timer
    pub fn set_completed(&self) {
        let now = self.clock.now();
        self.state.send_modify(|state| {
            if let Some(state) = state {
                state.rest.mark_set_completed(now);
                state.sets_logged += 1;
            }
        });
    }

    pub fn set_rest_target(&self, seconds: u64) {
        self.state.send_modify(|state| {
            if let Some(state) = state {
                state.rest.set_target(seconds);
            }
        });
    }

    /// Seconds rested since the last set, for the next set payload.
    ///
    /// A gap longer than `max_seconds` is a break rather than a rest and is
    /// reported as `None`, so the value always passes validation.
    pub fn rest_seconds(&self, max_seconds: u32) -> Option<u32> {
        let now = self.clock.now();
        self.state
            .borrow()
            .as_ref()
            .and_then(|state| state.rest.rest_seconds(now))
            .filter(|&rest| rest <= max_seconds)
    }

    pub fn elapsed(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.state
            .borrow()
            .as_ref()
            .map(|state| (now - state.started_at).max(Duration::zero()))
    }

    /// One status line: workout clock plus rest countdown
    pub fn status_line(&self) -> Option<String> {
        let now = self.clock.now();
        let state = self.state.borrow();
        let state = state.as_ref()?;

        let elapsed = format_duration((now - state.started_at).max(Duration::zero()));
        let target = state.rest.target();
        let rest = match state.rest.elapsed(now) {
            None => "no sets yet".to_string(),
            Some(rested) if rested > target => {
                format!("rest over by {}", format_duration(rested - target))
            }
            Some(rested) => format!("rest {} left", format_duration(target - rested)),
        };

        Some(format!(
            "{} | {} | {} sets | {}",
            state.name, elapsed, state.sets_logged, rest
        ))
    }

    pub fn end(&self) {
        self.state.send_replace(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationLimits;
    use crate::session::{ManualClock, SetEntry};
    use chrono::{DateTime, Utc};

    fn t0() -> DateTime<Utc> {
        "2024-05-01T10:00:00Z".parse().unwrap()
    }

    fn workout() -> Workout {
        Workout {
            id: 9,
            name: "Pull".to_string(),
            started_at: t0(),
            finished_at: None,
            notes: None,
            exercises: Vec::new(),
        }
    }

    #[test]
    fn test_status_line_tracks_rest() {
        let clock = Arc::new(ManualClock::new(t0()));
        let store = ActiveWorkoutStore::new(clock.clone(), 90);

        assert!(store.status_line().is_none());

        store.begin(&workout());
        clock.advance(Duration::minutes(5));
        assert_eq!(
            store.status_line().unwrap(),
            "Pull | 5:00 | 0 sets | no sets yet"
        );

        store.set_completed();
        clock.advance(Duration::seconds(30));
        assert_eq!(store.rest_seconds(3600), Some(30));
        assert_eq!(
            store.status_line().unwrap(),
            "Pull | 5:30 | 1 sets | rest 1:00 left"
        );

        clock.advance(Duration::seconds(75));
        assert_eq!(
            store.status_line().unwrap(),
            "Pull | 6:45 | 1 sets | rest over by 0:15"
        );
    }

    #[test]
    fn test_set_after_long_break_can_be_submitted() {
        let limits = ValidationLimits::default();
        let clock = Arc::new(ManualClock::new(t0()));
        let store = ActiveWorkoutStore::new(clock.clone(), 90);
        store.begin(&workout());
        store.set_completed();

        clock.advance(Duration::minutes(65));
        assert_eq!(store.rest_seconds(limits.max_rest_seconds), None);

        let mut entry = SetEntry::new();
        let set = entry
            .submit(100.0, 5, store.rest_seconds(limits.max_rest_seconds), &limits)
            .unwrap();
        assert_eq!(set.rest_seconds, None);

        // a normal rest is still recorded
        store.set_completed();
        clock.advance(Duration::seconds(3600));
        assert_eq!(store.rest_seconds(limits.max_rest_seconds), Some(3600));
        entry.reset();
        assert!(entry
            .submit(100.0, 5, store.rest_seconds(limits.max_rest_seconds), &limits)
            .is_ok());
    }

    #[test]
    fn test_end_clears_state() {
        let clock = Arc::new(ManualClock::new(t0()));
        let store = ActiveWorkoutStore::new(clock, 60);
        store.begin(&workout());
        assert!(store.elapsed().is_some());
        store.end();
        assert!(store.current().is_none());
        assert!(store.elapsed().is_none());
    }
}
