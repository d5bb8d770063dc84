//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`RecordWorkoutCommand`], [`WorkoutsQuery`]) are what
//! inbound adapters call; the driven port ([`WorkoutRepository`]) is what the
//! domain expects a store adapter to provide.

mod record_workout_command;
mod workout_repository;
mod workouts_query;

#[cfg(test)]
pub use record_workout_command::MockRecordWorkoutCommand;
pub use record_workout_command::RecordWorkoutCommand;
#[cfg(test)]
pub use workout_repository::MockWorkoutRepository;
pub use workout_repository::{WorkoutRepository, WorkoutRepositoryError};
#[cfg(test)]
pub use workouts_query::MockWorkoutsQuery;
pub use workouts_query::{WorkoutSummary, WorkoutsQuery};
