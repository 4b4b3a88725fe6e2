use anyhow::Result;
use colored::Colorize;

use super::output;
use super::AppContext;
use crate::features::{Feature, FeatureGate};
use crate::models::{ExerciseQuery, NewExercise};

pub async fn list_exercises(
    ctx: &AppContext,
    search: Option<String>,
    muscle_group: Option<String>,
) -> Result<()> {
    let query = ExerciseQuery {
        search,
        muscle_group,
    };
    let exercises = ctx.api()?.list_exercises(&query).await?;

    output::heading("Exercises");

    if exercises.is_empty() {
        println!("No exercises match.");
        return Ok(());
    }

    for exercise in &exercises {
        let custom = if exercise.is_custom { " (custom)" } else { "" };
        println!(
            "{:>6}  {:<28} {:<12} {}{}",
            exercise.id,
            exercise.name,
            exercise.muscle_group,
            exercise.equipment.as_deref().unwrap_or("-"),
            custom.dimmed()
        );
    }

    Ok(())
}

pub async fn show_exercise(ctx: &AppContext, id: i64) -> Result<()> {
    let exercise = ctx.api()?.get_exercise(id).await?;

    output::heading(&exercise.name);
    println!("Muscle group: {}", exercise.muscle_group);
    if let Some(equipment) = &exercise.equipment {
        println!("Equipment:    {}", equipment);
    }
    if let Some(description) = &exercise.description {
        println!();
        println!("{}", description);
    }

    Ok(())
}

pub async fn create_exercise(
    ctx: &AppContext,
    name: String,
    muscle_group: String,
    equipment: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let client = ctx.api()?;
    FeatureGate::from_store(client.tokens().as_ref())?.ensure(Feature::CustomExercises)?;

    let exercise = client
        .create_exercise(&NewExercise {
            name,
            muscle_group: muscle_group.to_lowercase(),
            equipment,
            description,
        })
        .await?;

    output::success(format!("Created exercise #{} ({})", exercise.id, exercise.name));
    Ok(())
}

pub async fn exercise_history(ctx: &AppContext, id: i64) -> Result<()> {
    let client = ctx.api()?;
    FeatureGate::from_store(client.tokens().as_ref())?.ensure(Feature::ExerciseHistory)?;

    let history = client.exercise_history(id).await?;

    output::heading("History");

    if history.is_empty() {
        println!("Not performed yet.");
        return Ok(());
    }

    let best = history
        .iter()
        .map(|entry| entry.estimated_one_rep_max())
        .fold(0.0_f64, f64::max);

    for entry in &history {
        let e1rm = entry.estimated_one_rep_max();
        let marker = if (e1rm - best).abs() < f64::EPSILON {
            " PR".green().to_string()
        } else {
            String::new()
        };
        println!(
            "{}  {} x {:<3} e1RM {:>9}  volume {}{}",
            entry.performed_at.format("%Y-%m-%d"),
            output::kg(entry.best_weight_kg),
            entry.best_reps,
            output::kg((e1rm * 10.0).round() / 10.0),
            output::kg(entry.volume),
            marker
        );
    }

    Ok(())
}
