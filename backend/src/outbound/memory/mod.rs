//! In-memory workout store.
//!
//! Records live for the lifetime of the process. Actix runs several workers,
//! so the sequence sits behind an [`RwLock`]: appends take the write lock and
//! reads clone under the read lock. No lock is held across an `.await`.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::Workout;
use crate::domain::ports::{WorkoutRepository, WorkoutRepositoryError};

fn poisoned<T>(_: PoisonError<T>) -> WorkoutRepositoryError {
    WorkoutRepositoryError::unavailable("store lock poisoned by a panicking writer")
}

/// Append-only workout store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryWorkoutRepository {
    workouts: RwLock<Vec<Workout>>,
}

impl InMemoryWorkoutRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkoutRepository for InMemoryWorkoutRepository {
    async fn append(&self, workout: Workout) -> Result<(), WorkoutRepositoryError> {
        self.workouts.write().map_err(poisoned)?.push(workout);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Workout>, WorkoutRepositoryError> {
        Ok(self.workouts.read().map_err(poisoned)?.clone())
    }
}
