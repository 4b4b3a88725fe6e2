//! Observable client-side caches of the last fetched data.
//!
//! Each store wraps a `tokio::sync::watch` channel: readers take a snapshot
//! or subscribe to every replacement. Fetch failures are logged and leave
//! the previous snapshot in place.

mod active_workout;
mod user;
mod workouts;

pub use active_workout::{ActiveWorkoutState, ActiveWorkoutStore};
pub use user::UserStore;
pub use workouts::WorkoutStore;
