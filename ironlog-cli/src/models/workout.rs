use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::Exercise;

/// Logged or in-progress training session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub name: String,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
}

/// An exercise slot within a workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub id: i64,
    pub exercise: Exercise,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
}

/// One performed repetition block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSet {
    pub id: i64,
    pub weight_kg: f64,
    pub reps: u32,
    #[serde(default)]
    pub rest_seconds: Option<u32>,
    #[serde(default)]
    pub is_warmup: bool,
    #[serde(default)]
    pub time_under_tension_seconds: Option<u32>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Payload for starting a workout
#[derive(Debug, Clone, Serialize)]
pub struct NewWorkout {
    pub name: String,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update of a workout; unset fields are left alone
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkoutUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// Payload for logging a set
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewSet {
    pub weight_kg: f64,
    pub reps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
    pub is_warmup: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_under_tension_seconds: Option<u32>,
}

impl NewWorkout {
    pub fn now(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started_at: Utc::now(),
            notes: None,
        }
    }
}

impl NewSet {
    pub fn new(weight_kg: f64, reps: u32) -> Self {
        Self {
            weight_kg,
            reps,
            rest_seconds: None,
            is_warmup: false,
            time_under_tension_seconds: None,
        }
    }

    pub fn warmup(mut self) -> Self {
        self.is_warmup = true;
        self
    }
}

impl Workout {
    /// Still in progress
    pub fn is_active(&self) -> bool {
        self.finished_at.is_none()
    }

    /// Wall time of the session, up to `now` when still running
    pub fn duration(&self, now: DateTime<Utc>) -> Duration {
        let end = self.finished_at.unwrap_or(now);
        (end - self.started_at).max(Duration::zero())
    }

    /// Exercises in the order the user performed them
    pub fn ordered_exercises(&self) -> Vec<&WorkoutExercise> {
        let mut exercises: Vec<&WorkoutExercise> = self.exercises.iter().collect();
        exercises.sort_by_key(|e| e.order);
        exercises
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// Sum of weight x reps over working sets
    pub fn total_volume(&self) -> f64 {
        self.exercises.iter().map(WorkoutExercise::volume).sum()
    }

    pub fn find_exercise(&self, workout_exercise_id: i64) -> Option<&WorkoutExercise> {
        self.exercises.iter().find(|e| e.id == workout_exercise_id)
    }
}

impl WorkoutExercise {
    pub fn volume(&self) -> f64 {
        self.sets
            .iter()
            .filter(|s| !s.is_warmup)
            .map(|s| s.weight_kg * f64::from(s.reps))
            .sum()
    }

    /// Heaviest working set
    pub fn top_set(&self) -> Option<&WorkoutSet> {
        self.sets
            .iter()
            .filter(|s| !s.is_warmup)
            .max_by(|a, b| a.weight_kg.total_cmp(&b.weight_kg))
    }

    /// Most recently completed set, used to seed the rest timer
    pub fn last_completed_at(&self) -> Option<DateTime<Utc>> {
        self.sets.iter().filter_map(|s| s.completed_at).max()
    }
}
