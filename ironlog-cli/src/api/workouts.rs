use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::models::{NewSet, NewWorkout, Workout, WorkoutExercise, WorkoutSet, WorkoutUpdate};

#[derive(Debug, Serialize)]
struct AddExerciseRequest {
    exercise_id: i64,
}

impl ApiClient {
    /// Workouts, most recent first. `limit` caps the page size.
    pub async fn list_workouts(&self, limit: Option<usize>) -> Result<Vec<Workout>, ApiError> {
        let query: Vec<(&str, String)> = limit
            .map(|l| vec![("limit", l.to_string())])
            .unwrap_or_default();

        let mut workouts: Vec<Workout> = self.get_list("/workout/", &query).await?;
        workouts.sort_by(|a, b| b.started_at.cmp(&a.started_at));

        tracing::debug!("Fetched {} workouts", workouts.len());
        Ok(workouts)
    }

    pub async fn get_workout(&self, id: i64) -> Result<Workout, ApiError> {
        self.get(&format!("/workout/{}/", id)).await
    }

    pub async fn create_workout(&self, workout: &NewWorkout) -> Result<Workout, ApiError> {
        let created: Workout = self.post("/workout/", workout).await?;
        tracing::info!("Started workout {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update_workout(
        &self,
        id: i64,
        update: &WorkoutUpdate,
    ) -> Result<Workout, ApiError> {
        self.put(&format!("/workout/{}/", id), update).await
    }

    /// Mark a workout as finished now
    pub async fn finish_workout(&self, id: i64) -> Result<Workout, ApiError> {
        let update = WorkoutUpdate {
            finished_at: Some(chrono::Utc::now()),
            ..Default::default()
        };
        self.update_workout(id, &update).await
    }

    pub async fn delete_workout(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/workout/{}/", id)).await?;
        tracing::info!("Deleted workout {}", id);
        Ok(())
    }

    pub async fn add_exercise_to_workout(
        &self,
        workout_id: i64,
        exercise_id: i64,
    ) -> Result<WorkoutExercise, ApiError> {
        self.post(
            &format!("/workout/{}/exercises/", workout_id),
            &AddExerciseRequest { exercise_id },
        )
        .await
    }

    pub async fn remove_exercise_from_workout(
        &self,
        workout_id: i64,
        workout_exercise_id: i64,
    ) -> Result<(), ApiError> {
        self.delete(&format!(
            "/workout/{}/exercises/{}/",
            workout_id, workout_exercise_id
        ))
        .await
    }

    pub async fn add_set(
        &self,
        workout_id: i64,
        workout_exercise_id: i64,
        set: &NewSet,
    ) -> Result<WorkoutSet, ApiError> {
        let created: WorkoutSet = self
            .post(
                &format!(
                    "/workout/{}/exercises/{}/sets/",
                    workout_id, workout_exercise_id
                ),
                set,
            )
            .await?;

        tracing::debug!(
            "Logged set {}: {} kg x {}",
            created.id,
            created.weight_kg,
            created.reps
        );
        Ok(created)
    }

    pub async fn update_set(&self, set_id: i64, set: &NewSet) -> Result<WorkoutSet, ApiError> {
        self.put(&format!("/workout/sets/{}/", set_id), set).await
    }

    pub async fn delete_set(&self, set_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/workout/sets/{}/", set_id)).await
    }
}
