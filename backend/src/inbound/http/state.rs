//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without a real store.

use std::sync::Arc;

use crate::domain::ports::{RecordWorkoutCommand, WorkoutsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub record: Arc<dyn RecordWorkoutCommand>,
    pub workouts: Arc<dyn WorkoutsQuery>,
}

impl HttpState {
    /// Bundle the ports handlers depend on.
    pub fn new(record: Arc<dyn RecordWorkoutCommand>, workouts: Arc<dyn WorkoutsQuery>) -> Self {
        Self { record, workouts }
    }

    /// Use one service for both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use workout_log::domain::WorkoutLogService;
    /// use workout_log::inbound::http::state::HttpState;
    /// use workout_log::outbound::memory::InMemoryWorkoutRepository;
    ///
    /// let service = WorkoutLogService::new(
    ///     Arc::new(InMemoryWorkoutRepository::new()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::from_service(Arc::new(service));
    /// # let _ = state;
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: RecordWorkoutCommand + WorkoutsQuery + 'static,
    {
        Self {
            record: service.clone(),
            workouts: service,
        }
    }
}
