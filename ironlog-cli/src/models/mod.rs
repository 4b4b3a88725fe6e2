pub mod account;
pub mod achievement;
pub mod exercise;
pub mod measurement;
pub mod validation;
pub mod workout;

pub use account::{BillingPeriod, Entitlement, ProfileUpdate, SubscriptionPackage, UserAccount};
pub use achievement::Achievement;
pub use exercise::{Exercise, ExerciseHistoryEntry, ExerciseQuery, NewExercise};
pub use measurement::{Measurement, MeasurementKind, NewMeasurement};
pub use validation::{parse_reps, parse_weight, validate_set, ValidationError, ValidationLimits};
pub use workout::{NewSet, NewWorkout, Workout, WorkoutExercise, WorkoutSet, WorkoutUpdate};
