//! Domain primitives, services, and ports for the workout log.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic error payload.
//! - `TraceId`: request correlation identifier.
//! - `Workout`, `WorkoutSubmission` and their validated parts.
//! - `WorkoutLogService`: implements the driving ports in [`ports`].

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod workout;
mod workout_log_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::TraceId;
pub use self::workout::{
    Workout, WorkoutDuration, WorkoutField, WorkoutName, WorkoutSubmission,
    WorkoutValidationError,
};
pub use self::workout_log_service::WorkoutLogService;

/// Header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
