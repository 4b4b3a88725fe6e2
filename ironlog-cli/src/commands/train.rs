use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use super::output;
use super::workout::print_workout;
use super::AppContext;
use crate::api::ApiClient;
use crate::models::{parse_reps, parse_weight, ExerciseQuery, Workout, WorkoutExercise};
use crate::session::{Clock, SessionError, SetEntry, SystemClock};
use crate::store::{ActiveWorkoutStore, WorkoutStore};

#[derive(Args)]
pub struct TrainCommand {
    /// Workout ID; defaults to the workout in progress
    workout: Option<i64>,

    /// Target rest between sets, in seconds
    #[arg(long)]
    rest: Option<u64>,
}

enum Action {
    Exercise(usize),
    AddExercise,
    Finish,
    Quit,
}

impl TrainCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let client = ctx.api()?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let mut workout = match self.workout {
            Some(id) => client.get_workout(id).await?,
            None => {
                let store = WorkoutStore::new();
                store.fetch_workouts(&client, Some(20)).await;
                store.active().context(
                    "No workout in progress. Start one with 'ironlog workout start <name>'",
                )?
            }
        };

        if !workout.is_active() {
            anyhow::bail!("Workout #{} is already finished", workout.id);
        }

        let rest_target = self.rest.unwrap_or(ctx.config.training.default_rest_seconds);
        let active = Arc::new(ActiveWorkoutStore::new(clock.clone(), rest_target));
        active.begin(&workout);

        tracing::info!("Training session for workout {}", workout.id);

        loop {
            if let Some(status) = active.status_line() {
                println!();
                println!("{}", status);
            }

            match choose_action(&workout)? {
                Action::Exercise(index) => {
                    let exercise = workout.ordered_exercises()[index].clone();
                    perform_sets(ctx, &client, &clock, &active, &workout, &exercise).await?;
                    workout = client.get_workout(workout.id).await?;
                }
                Action::AddExercise => {
                    if add_exercise(&client, &workout).await? {
                        workout = client.get_workout(workout.id).await?;
                    }
                }
                Action::Finish => {
                    let finished = client.finish_workout(workout.id).await?;
                    active.end();
                    println!();
                    output::success("Workout finished!");
                    println!();
                    print_workout(&finished);
                    return Ok(());
                }
                Action::Quit => {
                    active.end();
                    println!("Workout #{} left in progress.", workout.id);
                    return Ok(());
                }
            }
        }
    }
}

fn choose_action(workout: &Workout) -> Result<Action> {
    let exercises = workout.ordered_exercises();
    let mut items: Vec<String> = exercises
        .iter()
        .map(|e| format!("{} ({} sets)", e.exercise.name, e.sets.len()))
        .collect();
    items.push("+ Add exercise".to_string());
    items.push("Finish workout".to_string());
    items.push("Quit (keep in progress)".to_string());

    let selection = Select::new()
        .with_prompt(workout.name.as_str())
        .items(&items)
        .default(0)
        .interact()?;

    let count = exercises.len();
    Ok(match selection {
        i if i < count => Action::Exercise(i),
        i if i == count => Action::AddExercise,
        i if i == count + 1 => Action::Finish,
        _ => Action::Quit,
    })
}

async fn add_exercise(client: &ApiClient, workout: &Workout) -> Result<bool> {
    let search: String = Input::new()
        .with_prompt("Search exercises")
        .allow_empty(true)
        .interact_text()?;

    let exercises = client
        .list_exercises(&ExerciseQuery {
            search: Some(search),
            muscle_group: None,
        })
        .await?;

    if exercises.is_empty() {
        output::failure("No exercises match.");
        return Ok(false);
    }

    let names: Vec<String> = exercises
        .iter()
        .map(|e| format!("{} ({})", e.name, e.muscle_group))
        .collect();
    let Some(choice) = Select::new()
        .with_prompt("Exercise")
        .items(&names)
        .default(0)
        .interact_opt()?
    else {
        return Ok(false);
    };

    let added = client
        .add_exercise_to_workout(workout.id, exercises[choice].id)
        .await?;
    output::success(format!("Added {}", added.exercise.name));
    Ok(true)
}

/// Set entry loop for one exercise
async fn perform_sets(
    ctx: &AppContext,
    client: &ApiClient,
    clock: &Arc<dyn Clock>,
    active: &Arc<ActiveWorkoutStore>,
    workout: &Workout,
    exercise: &WorkoutExercise,
) -> Result<()> {
    let mut entry = SetEntry::new();
    let mut last_weight = exercise.sets.last().map(|s| s.weight_kg);
    let mut last_reps = exercise.sets.last().map(|s| s.reps);

    loop {
        println!();
        let choice = Select::new()
            .with_prompt(exercise.exercise.name.as_str())
            .items(&[
                "Start set (time under tension)",
                "Log set without timer",
                "Log warmup set",
                "Rest",
                "Back",
            ])
            .default(0)
            .interact()?;

        entry.set_warmup(choice == 2);
        match choice {
            0 => {
                entry.start(clock.now())?;
                wait_for_enter(tension_spinner(), None).await?;
                let tut = entry.stop(clock.now())?;
                println!("Time under tension: {}s", tut.num_seconds());
            }
            1 | 2 => entry.reset(),
            3 => {
                rest(ctx, active).await?;
                continue;
            }
            _ => return Ok(()),
        }

        // Re-prompt until the input passes validation; the entry keeps its state
        let set = loop {
            let weight: String = Input::new()
                .with_prompt(format!("Weight ({})", ctx.config.training.weight_unit))
                .with_initial_text(last_weight.map(|w| w.to_string()).unwrap_or_default())
                .interact_text()?;
            let reps: String = Input::new()
                .with_prompt("Reps")
                .with_initial_text(last_reps.map(|r| r.to_string()).unwrap_or_default())
                .interact_text()?;

            let parsed = parse_weight(&weight).and_then(|w| parse_reps(&reps).map(|r| (w, r)));
            let (weight, reps) = match parsed {
                Ok(values) => values,
                Err(e) => {
                    output::failure(e);
                    continue;
                }
            };

            let weight = ctx.config.training.to_kg(weight);
            let limits = &ctx.config.validation;
            let rest = active.rest_seconds(limits.max_rest_seconds);
            match entry.submit(weight, reps, rest, limits) {
                Ok(set) => break set,
                Err(SessionError::Validation(e)) => output::failure(e),
                Err(e) => return Err(e.into()),
            }
        };

        match client.add_set(workout.id, exercise.id, &set).await {
            Ok(logged) => {
                active.set_completed();
                last_weight = Some(logged.weight_kg);
                last_reps = Some(logged.reps);
                output::success(format!(
                    "Set logged: {} x {}",
                    output::kg(logged.weight_kg),
                    logged.reps
                ));
            }
            Err(e) => {
                output::failure(format!("Could not save set: {}", e));
                if e.requires_login() {
                    return Err(e.into());
                }
                entry.reset();
                continue;
            }
        }

        if !set.is_warmup {
            rest(ctx, active).await?;
        }
    }
}

/// Show the rest countdown until the user is ready
async fn rest(ctx: &AppContext, active: &Arc<ActiveWorkoutStore>) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}  (Enter when ready)")?);

    let ticker = {
        let spinner = spinner.clone();
        let active = active.clone();
        let tick = Duration::from_millis(ctx.config.training.timer_tick_millis.max(100));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            loop {
                interval.tick().await;
                if let Some(status) = active.status_line() {
                    spinner.set_message(status);
                }
                spinner.tick();
            }
        })
    };

    wait_for_enter(spinner, Some(ticker)).await
}

fn tension_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} Under tension {elapsed}  (Enter to stop)")
    {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(200));
    spinner
}

/// Block on a line from stdin without stalling the runtime
async fn wait_for_enter(
    spinner: ProgressBar,
    ticker: Option<tokio::task::JoinHandle<()>>,
) -> Result<()> {
    let read = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| ())
    })
    .await;

    if let Some(ticker) = ticker {
        ticker.abort();
    }
    spinner.finish_and_clear();

    read.context("Input task failed")?
        .context("Failed to read from stdin")
}
