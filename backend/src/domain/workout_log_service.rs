//! Workout log domain service.
//!
//! Implements both driving ports on top of a [`WorkoutRepository`], stamping
//! each recorded workout with the injected clock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{
    RecordWorkoutCommand, WorkoutRepository, WorkoutRepositoryError, WorkoutsQuery,
};
use crate::domain::{Error, Workout, WorkoutSubmission};

fn map_repository_error(err: WorkoutRepositoryError) -> Error {
    error!(error = %err, "workout store failure");
    match err {
        WorkoutRepositoryError::Unavailable { message } => {
            Error::service_unavailable(format!("workout store unavailable: {message}"))
        }
    }
}

/// Service recording and listing workouts.
#[derive(Clone)]
pub struct WorkoutLogService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> WorkoutLogService<R> {
    /// Create a service backed by `repository`, timestamping with `clock`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use workout_log::domain::WorkoutLogService;
    /// use workout_log::outbound::memory::InMemoryWorkoutRepository;
    ///
    /// let service = WorkoutLogService::new(
    ///     Arc::new(InMemoryWorkoutRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl<R> RecordWorkoutCommand for WorkoutLogService<R>
where
    R: WorkoutRepository,
{
    async fn record(&self, submission: WorkoutSubmission) -> Result<Workout, Error> {
        let workout = Workout::record(submission, self.clock.utc());
        self.repository
            .append(workout.clone())
            .await
            .map_err(map_repository_error)?;
        info!(
            name = %workout.name(),
            duration = workout.duration().minutes(),
            "workout recorded"
        );
        Ok(workout)
    }
}

#[async_trait]
impl<R> WorkoutsQuery for WorkoutLogService<R>
where
    R: WorkoutRepository,
{
    async fn list(&self) -> Result<Vec<Workout>, Error> {
        self.repository.all().await.map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "workout_log_service_tests.rs"]
mod tests;
