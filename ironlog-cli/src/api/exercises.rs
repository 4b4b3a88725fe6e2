use super::{ApiClient, ApiError};
use crate::models::{Exercise, ExerciseHistoryEntry, ExerciseQuery, NewExercise};

impl ApiClient {
    pub async fn list_exercises(&self, query: &ExerciseQuery) -> Result<Vec<Exercise>, ApiError> {
        let params = query.to_params();
        self.get_list("/exercise/", &params).await
    }

    pub async fn get_exercise(&self, id: i64) -> Result<Exercise, ApiError> {
        self.get(&format!("/exercise/{}/", id)).await
    }

    /// Create a user-defined exercise
    pub async fn create_exercise(&self, exercise: &NewExercise) -> Result<Exercise, ApiError> {
        let created: Exercise = self.post("/exercise/", exercise).await?;
        tracing::info!("Created custom exercise {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Past performances of an exercise, oldest first
    pub async fn exercise_history(&self, id: i64) -> Result<Vec<ExerciseHistoryEntry>, ApiError> {
        let mut history: Vec<ExerciseHistoryEntry> =
            self.get_list(&format!("/exercise/{}/history/", id), &[]).await?;
        history.sort_by(|a, b| a.performed_at.cmp(&b.performed_at));
        Ok(history)
    }
}
