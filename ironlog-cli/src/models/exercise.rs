use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exercise catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub muscle_group: String,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
}

/// Payload for a user-defined exercise
#[derive(Debug, Clone, Serialize)]
pub struct NewExercise {
    pub name: String,
    pub muscle_group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Filter criteria for the exercise catalog
#[derive(Debug, Default, Clone)]
pub struct ExerciseQuery {
    pub search: Option<String>,
    pub muscle_group: Option<String>,
}

impl ExerciseQuery {
    /// Query-string pairs for the non-empty filters
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(group) = self
            .muscle_group
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            params.push(("muscle_group", group.to_lowercase()));
        }
        params
    }
}

/// Per-workout summary of one exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseHistoryEntry {
    pub workout_id: i64,
    pub performed_at: DateTime<Utc>,
    pub best_weight_kg: f64,
    pub best_reps: u32,
    #[serde(default)]
    pub volume: f64,
}

impl ExerciseHistoryEntry {
    /// Epley one-rep-max estimate of the best set
    pub fn estimated_one_rep_max(&self) -> f64 {
        if self.best_reps <= 1 {
            return self.best_weight_kg;
        }
        self.best_weight_kg * (1.0 + f64::from(self.best_reps) / 30.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_skip_blank_filters() {
        let query = ExerciseQuery {
            search: Some("  ".to_string()),
            muscle_group: Some("Chest".to_string()),
        };
        assert_eq!(query.to_params(), vec![("muscle_group", "chest".to_string())]);
        assert!(ExerciseQuery::default().to_params().is_empty());
    }

    #[test]
    fn test_one_rep_max_estimate() {
        let entry = ExerciseHistoryEntry {
            workout_id: 1,
            performed_at: Utc::now(),
            best_weight_kg: 100.0,
            best_reps: 3,
            volume: 300.0,
        };
        assert!((entry.estimated_one_rep_max() - 110.0).abs() < 1e-9);

        let single = ExerciseHistoryEntry { best_reps: 1, ..entry };
        assert_eq!(single.estimated_one_rep_max(), 100.0);
    }
}
