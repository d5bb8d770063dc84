//! Driving port for recording workouts.

use async_trait::async_trait;

use crate::domain::{Error, Workout, WorkoutSubmission};

/// Domain use-case port for adding a workout to the log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordWorkoutCommand: Send + Sync {
    /// Record a validated submission and return the stored workout.
    async fn record(&self, submission: WorkoutSubmission) -> Result<Workout, Error>;
}
