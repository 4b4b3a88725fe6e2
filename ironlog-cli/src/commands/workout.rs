use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use dialoguer::Confirm;

use super::output;
use super::AppContext;
use crate::features::{Feature, FeatureGate};
use crate::models::{parse_reps, parse_weight, validate_set, NewSet, NewWorkout, Workout};
use crate::session::format_duration;
use crate::store::WorkoutStore;

pub async fn list_workouts(ctx: &AppContext, limit: usize) -> Result<()> {
    let client = ctx.api()?;
    let gate = FeatureGate::from_store(client.tokens().as_ref())?;
    let limit = gate.history_limit(limit);

    let store = WorkoutStore::new();
    let workouts = store.fetch_workouts(&client, Some(limit)).await;

    output::heading("Recent Workouts");

    if workouts.is_empty() {
        println!("No workouts yet. Start one with 'ironlog workout start <name>'.");
        return Ok(());
    }

    let now = Utc::now();
    for workout in workouts.iter().take(limit) {
        let status = if workout.is_active() {
            "in progress".yellow().to_string()
        } else {
            format_duration(workout.duration(now))
        };
        println!(
            "{:>6}  {}  {:<24} {:>9}  {} sets",
            workout.id,
            workout.started_at.format("%Y-%m-%d"),
            workout.name,
            status,
            workout.total_sets()
        );
    }

    if !gate.is_enabled(Feature::UnlimitedWorkoutHistory) && workouts.len() >= limit {
        println!();
        println!("Free accounts see the last {} workouts.", limit);
    }

    Ok(())
}

pub fn print_workout(workout: &Workout) {
    let now = Utc::now();

    output::heading(&format!("{} (#{})", workout.name, workout.id));
    println!("Started:  {}", workout.started_at.format("%Y-%m-%d %H:%M"));
    match workout.finished_at {
        Some(finished) => println!("Finished: {}", finished.format("%Y-%m-%d %H:%M")),
        None => println!("Finished: {}", "in progress".yellow()),
    }
    println!("Duration: {}", format_duration(workout.duration(now)));
    if let Some(notes) = &workout.notes {
        println!("Notes:    {}", notes);
    }
    println!();

    for exercise in workout.ordered_exercises() {
        println!(
            "[{}] {} ({})",
            exercise.id,
            exercise.exercise.name.bold(),
            exercise.exercise.muscle_group
        );
        if exercise.sets.is_empty() {
            println!("      no sets");
        }
        for (index, set) in exercise.sets.iter().enumerate() {
            let mut line = format!(
                "  {:>2}. {} x {}",
                index + 1,
                output::kg(set.weight_kg),
                set.reps
            );
            if set.is_warmup {
                line.push_str(" (warmup)");
            }
            if let Some(tut) = set.time_under_tension_seconds {
                line.push_str(&format!("  TUT {}s", tut));
            }
            if let Some(rest) = set.rest_seconds {
                line.push_str(&format!("  rest {}s", rest));
            }
            println!("{}   #{}", line, set.id.to_string().dimmed());
        }
    }

    println!();
    println!(
        "{} sets, {} volume",
        workout.total_sets(),
        output::kg(workout.total_volume())
    );
}

pub async fn show_workout(ctx: &AppContext, id: i64) -> Result<()> {
    let workout = ctx.api()?.get_workout(id).await?;
    print_workout(&workout);
    Ok(())
}

pub async fn start_workout(ctx: &AppContext, name: String, notes: Option<String>) -> Result<()> {
    let mut request = NewWorkout::now(name);
    request.notes = notes;

    let workout = ctx.api()?.create_workout(&request).await?;

    output::success(format!("Started workout #{} ({})", workout.id, workout.name));
    println!();
    println!("Run 'ironlog train {}' to log sets interactively.", workout.id);
    Ok(())
}

pub async fn finish_workout(ctx: &AppContext, id: i64) -> Result<()> {
    let workout = ctx.api()?.finish_workout(id).await?;

    output::success(format!(
        "Finished {} after {}: {} sets, {} volume",
        workout.name,
        format_duration(workout.duration(Utc::now())),
        workout.total_sets(),
        output::kg(workout.total_volume())
    ));
    Ok(())
}

pub async fn delete_workout(ctx: &AppContext, id: i64, force: bool) -> Result<()> {
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete workout #{}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    ctx.api()?.delete_workout(id).await?;

    output::success(format!("Deleted workout #{}", id));
    Ok(())
}

pub async fn add_exercise(ctx: &AppContext, workout_id: i64, exercise_id: i64) -> Result<()> {
    let added = ctx
        .api()?
        .add_exercise_to_workout(workout_id, exercise_id)
        .await?;

    output::success(format!(
        "Added {} to workout #{} as [{}]",
        added.exercise.name, workout_id, added.id
    ));
    Ok(())
}

pub async fn log_set(
    ctx: &AppContext,
    workout_id: i64,
    workout_exercise_id: i64,
    weight: &str,
    reps: &str,
    rest: Option<u32>,
    warmup: bool,
) -> Result<()> {
    let weight = ctx.config.training.to_kg(parse_weight(weight)?);
    let mut set = NewSet::new(weight, parse_reps(reps)?);
    set.rest_seconds = rest;
    set.is_warmup = warmup;

    if let Err(e) = validate_set(&mut set, &ctx.config.validation) {
        output::failure(&e);
        return Err(e.into());
    }

    let logged = ctx
        .api()?
        .add_set(workout_id, workout_exercise_id, &set)
        .await?;

    output::success(format!(
        "Logged set #{}: {} x {}",
        logged.id,
        output::kg(logged.weight_kg),
        logged.reps
    ));
    Ok(())
}

pub async fn delete_set(ctx: &AppContext, id: i64) -> Result<()> {
    ctx.api()?.delete_set(id).await?;
    output::success(format!("Deleted set #{}", id));
    Ok(())
}
