//! Driving port for reading the workout log.

use async_trait::async_trait;

use crate::domain::{Error, Workout};

/// Aggregate figures shown alongside the workout list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkoutSummary {
    /// Number of recorded workouts.
    pub count: usize,
    /// Sum of all durations in minutes, saturating at the `i64` bounds.
    pub total_minutes: i64,
}

impl WorkoutSummary {
    /// Summarise a slice of workouts.
    ///
    /// # Examples
    /// ```
    /// use workout_log::domain::ports::WorkoutSummary;
    ///
    /// let summary = WorkoutSummary::from_workouts(&[]);
    /// assert_eq!(summary, WorkoutSummary::default());
    /// ```
    #[must_use]
    pub fn from_workouts(workouts: &[Workout]) -> Self {
        let total_minutes = workouts
            .iter()
            .fold(0_i64, |acc, w| acc.saturating_add(w.duration().minutes()));
        Self {
            count: workouts.len(),
            total_minutes,
        }
    }
}

/// Domain use-case port for listing workouts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkoutsQuery: Send + Sync {
    /// Return every recorded workout in insertion order.
    async fn list(&self) -> Result<Vec<Workout>, Error>;
}
