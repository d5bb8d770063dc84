//! Driven port for the workout store.
//!
//! The store is append-only: records are added at the end and read back in
//! insertion order. Adapters decide how the sequence is held and guarded.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Workout;

/// Errors raised by workout store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkoutRepositoryError {
    /// The store cannot serve reads or writes, e.g. after a writer panicked.
    #[error("workout store unavailable: {message}")]
    Unavailable { message: String },
}

impl WorkoutRepositoryError {
    /// Build an [`WorkoutRepositoryError::Unavailable`] error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Port for appending and listing workouts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Append a workout to the end of the store.
    async fn append(&self, workout: Workout) -> Result<(), WorkoutRepositoryError>;

    /// Return every stored workout in insertion order.
    async fn all(&self) -> Result<Vec<Workout>, WorkoutRepositoryError>;
}
