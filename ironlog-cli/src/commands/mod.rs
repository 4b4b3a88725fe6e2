mod achievements;
mod config_cmd;
mod exercise;
mod login;
mod logout;
mod measurement;
mod output;
mod profile;
mod register;
mod subscription;
mod train;
mod whoami;
mod workout;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::storage::{SledTokenStore, TokenStore};

pub use login::LoginCommand;
pub use logout::LogoutCommand;
pub use register::RegisterCommand;
pub use train::TrainCommand;
pub use whoami::WhoamiCommand;

#[derive(Parser)]
#[command(name = "ironlog")]
#[command(about = "Strength-training log for the IronLog service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "IRONLOG_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Login to IronLog
    Login(LoginCommand),

    /// Create an IronLog account
    Register(RegisterCommand),

    /// Logout from IronLog
    Logout(LogoutCommand),

    /// Show current user information
    Whoami(WhoamiCommand),

    /// Manage your profile
    #[command(subcommand)]
    Profile(ProfileSubcommands),

    /// Manage workouts
    #[command(subcommand)]
    Workout(WorkoutSubcommands),

    /// Browse the exercise catalog
    #[command(subcommand)]
    Exercise(ExerciseSubcommands),

    /// Track body measurements
    #[command(subcommand)]
    Measurement(MeasurementSubcommands),

    /// Show achievements
    Achievements {
        /// Only recently unlocked achievements
        #[arg(short, long)]
        recent: bool,
    },

    /// Subscription status and packages
    #[command(subcommand)]
    Subscription(SubscriptionSubcommands),

    /// Run an interactive training session with set timer and rest timer
    #[command(
        after_help = "The local token store stays locked while a session runs; \
                      run other ironlog commands after quitting the session."
    )]
    Train(TrainCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ProfileSubcommands {
    /// Update profile fields
    Update {
        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,
    },

    /// Permanently delete the account
    Delete {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum WorkoutSubcommands {
    /// List recent workouts
    List {
        /// Number of workouts to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show workout details
    Show {
        /// Workout ID
        id: i64,
    },

    /// Start a new workout
    Start {
        /// Workout name
        name: String,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Finish a workout
    Finish {
        /// Workout ID
        id: i64,
    },

    /// Delete a workout
    Delete {
        /// Workout ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Add an exercise to a workout
    AddExercise {
        /// Workout ID
        workout: i64,

        /// Exercise ID
        exercise: i64,
    },

    /// Log a set without the interactive timer
    LogSet {
        /// Workout ID
        workout: i64,

        /// Workout exercise ID (as shown by `workout show`)
        workout_exercise: i64,

        /// Weight in kg
        #[arg(short, long)]
        weight: String,

        /// Repetitions
        #[arg(short, long)]
        reps: String,

        /// Rest before the set, in seconds
        #[arg(long)]
        rest: Option<u32>,

        /// Mark as warmup set
        #[arg(long)]
        warmup: bool,
    },

    /// Delete a logged set
    DeleteSet {
        /// Set ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum ExerciseSubcommands {
    /// Search the catalog
    List {
        /// Name search
        #[arg(short, long)]
        search: Option<String>,

        /// Muscle group filter
        #[arg(short, long)]
        muscle: Option<String>,
    },

    /// Show exercise details
    Show {
        /// Exercise ID
        id: i64,
    },

    /// Create a custom exercise (PRO)
    Create {
        name: String,

        #[arg(short, long)]
        muscle: String,

        #[arg(short, long)]
        equipment: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show past performances (PRO)
    History {
        /// Exercise ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum MeasurementSubcommands {
    /// List measurements
    List {
        /// Only one kind (body_weight, body_fat, chest, waist, hips, biceps, thigh)
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Record a measurement
    Add {
        /// Measurement kind
        kind: String,

        /// Value
        value: String,

        /// Unit, defaults to the kind's usual unit
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Delete a measurement
    Delete {
        /// Measurement ID
        id: i64,
    },

    /// Chart one kind over time (PRO)
    Chart {
        /// Measurement kind
        kind: String,
    },
}

#[derive(Subcommand)]
enum SubscriptionSubcommands {
    /// Show current entitlement
    Status,

    /// List available packages
    Packages,
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Edit configuration file
    Edit,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

/// Resolved configuration and token store shared by command handlers
pub struct AppContext {
    pub config: Config,
    pub config_path: PathBuf,
    tokens: Arc<dyn TokenStore>,
}

impl AppContext {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = Config::resolve_path(config_path.as_deref())?;
        let config = Config::load_from(&config_path)?;
        let tokens: Arc<dyn TokenStore> = Arc::new(SledTokenStore::init()?);

        Ok(Self {
            config,
            config_path,
            tokens,
        })
    }

    pub fn with_store(config: Config, config_path: PathBuf, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            config,
            config_path,
            tokens,
        }
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn api(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config, self.tokens.clone())
    }
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        // Completions and config path need neither the store nor the network
        match &self.command {
            Commands::Completions { shell } => {
                generate_completions(*shell);
                return Ok(());
            }
            Commands::Config(ConfigSubcommands::Path) => {
                let path = Config::resolve_path(self.config.as_deref())?;
                println!("{}", path.display());
                return Ok(());
            }
            _ => {}
        }

        let ctx = AppContext::load(self.config)?;

        let result = match self.command {
            Commands::Login(cmd) => cmd.execute(&ctx).await,
            Commands::Register(cmd) => cmd.execute(&ctx).await,
            Commands::Logout(cmd) => cmd.execute(&ctx).await,
            Commands::Whoami(cmd) => cmd.execute(&ctx).await,
            Commands::Profile(subcmd) => match subcmd {
                ProfileSubcommands::Update {
                    email,
                    first_name,
                    last_name,
                } => profile::update_profile(&ctx, email, first_name, last_name).await,
                ProfileSubcommands::Delete { force } => {
                    profile::delete_account(&ctx, force).await
                }
            },
            Commands::Workout(subcmd) => match subcmd {
                WorkoutSubcommands::List { limit } => workout::list_workouts(&ctx, limit).await,
                WorkoutSubcommands::Show { id } => workout::show_workout(&ctx, id).await,
                WorkoutSubcommands::Start { name, notes } => {
                    workout::start_workout(&ctx, name, notes).await
                }
                WorkoutSubcommands::Finish { id } => workout::finish_workout(&ctx, id).await,
                WorkoutSubcommands::Delete { id, force } => {
                    workout::delete_workout(&ctx, id, force).await
                }
                WorkoutSubcommands::AddExercise { workout, exercise } => {
                    workout::add_exercise(&ctx, workout, exercise).await
                }
                WorkoutSubcommands::LogSet {
                    workout,
                    workout_exercise,
                    weight,
                    reps,
                    rest,
                    warmup,
                } => {
                    workout::log_set(
                        &ctx,
                        workout,
                        workout_exercise,
                        &weight,
                        &reps,
                        rest,
                        warmup,
                    )
                    .await
                }
                WorkoutSubcommands::DeleteSet { id } => workout::delete_set(&ctx, id).await,
            },
            Commands::Exercise(subcmd) => match subcmd {
                ExerciseSubcommands::List { search, muscle } => {
                    exercise::list_exercises(&ctx, search, muscle).await
                }
                ExerciseSubcommands::Show { id } => exercise::show_exercise(&ctx, id).await,
                ExerciseSubcommands::Create {
                    name,
                    muscle,
                    equipment,
                    description,
                } => exercise::create_exercise(&ctx, name, muscle, equipment, description).await,
                ExerciseSubcommands::History { id } => {
                    exercise::exercise_history(&ctx, id).await
                }
            },
            Commands::Measurement(subcmd) => match subcmd {
                MeasurementSubcommands::List { kind } => {
                    measurement::list_measurements(&ctx, kind).await
                }
                MeasurementSubcommands::Add { kind, value, unit } => {
                    measurement::add_measurement(&ctx, &kind, &value, unit).await
                }
                MeasurementSubcommands::Delete { id } => {
                    measurement::delete_measurement(&ctx, id).await
                }
                MeasurementSubcommands::Chart { kind } => {
                    measurement::chart_measurements(&ctx, &kind).await
                }
            },
            Commands::Achievements { recent } => {
                achievements::list_achievements(&ctx, recent).await
            }
            Commands::Subscription(subcmd) => match subcmd {
                SubscriptionSubcommands::Status => subscription::show_status(&ctx).await,
                SubscriptionSubcommands::Packages => subscription::list_packages(&ctx).await,
            },
            Commands::Train(cmd) => cmd.execute(&ctx).await,
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(&ctx).await,
                ConfigSubcommands::Edit => config_cmd::edit_config(&ctx).await,
                ConfigSubcommands::Init { force } => config_cmd::init_config(&ctx, force).await,
                ConfigSubcommands::Path => Ok(()),
            },
            Commands::Completions { .. } => Ok(()),
        };

        if let Err(e) = &result {
            output::explain_error(e);
        }
        result
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
