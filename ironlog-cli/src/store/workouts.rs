use tokio::sync::watch;

use crate::api::ApiClient;
use crate::models::Workout;

/// Cached workout list, most recent first
pub struct WorkoutStore {
    state: watch::Sender<Vec<Workout>>,
}

impl Default for WorkoutStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(Vec::new());
        Self { state }
    }

    pub fn workouts(&self) -> Vec<Workout> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Workout>> {
        self.state.subscribe()
    }

    /// Replace the list from the server. On failure the previous list is
    /// kept. Returns the list now held.
    pub async fn fetch_workouts(&self, api: &ApiClient, limit: Option<usize>) -> Vec<Workout> {
        match api.list_workouts(limit).await {
            Ok(workouts) => {
                self.state.send_replace(workouts);
            }
            Err(e) => {
                tracing::warn!("Failed to fetch workouts: {}", e);
            }
        }
        self.workouts()
    }

    /// Insert or replace a workout, keeping the order
    pub fn upsert(&self, workout: Workout) {
        self.state.send_modify(|workouts| {
            match workouts.iter_mut().find(|w| w.id == workout.id) {
                Some(existing) => *existing = workout,
                None => workouts.push(workout),
            }
            workouts.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        });
    }

    pub fn remove(&self, id: i64) -> bool {
        let mut removed = false;
        self.state.send_if_modified(|workouts| {
            let before = workouts.len();
            workouts.retain(|w| w.id != id);
            removed = workouts.len() != before;
            removed
        });
        removed
    }

    /// The in-progress workout, if any
    pub fn active(&self) -> Option<Workout> {
        self.state.borrow().iter().find(|w| w.is_active()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn workout(id: i64, hours_ago: i64, finished: bool) -> Workout {
        let started_at = Utc::now() - Duration::hours(hours_ago);
        Workout {
            id,
            name: format!("Workout {}", id),
            started_at,
            finished_at: finished.then(|| started_at + Duration::minutes(50)),
            notes: None,
            exercises: Vec::new(),
        }
    }

    #[test]
    fn test_upsert_keeps_most_recent_first() {
        let store = WorkoutStore::new();
        store.upsert(workout(1, 48, true));
        store.upsert(workout(2, 1, false));
        store.upsert(workout(3, 24, true));

        let ids: Vec<i64> = store.workouts().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        let mut renamed = workout(3, 24, true);
        renamed.name = "Legs".to_string();
        store.upsert(renamed);
        assert_eq!(store.workouts().len(), 3);
        assert!(store.workouts().iter().any(|w| w.name == "Legs"));
    }

    #[test]
    fn test_active_and_remove() {
        let store = WorkoutStore::new();
        store.upsert(workout(1, 48, true));
        store.upsert(workout(2, 1, false));

        assert_eq!(store.active().map(|w| w.id), Some(2));
        assert!(store.remove(2));
        assert!(!store.remove(2));
        assert!(store.active().is_none());
    }

    #[test]
    fn test_subscribers_see_changes() {
        let store = WorkoutStore::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.upsert(workout(1, 2, true));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }
}
