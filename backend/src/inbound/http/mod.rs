//! HTTP inbound adapter serving the workout log pages.

pub mod error;
pub mod flash;
pub mod health;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;
pub mod workouts;

pub use error::ApiResult;
