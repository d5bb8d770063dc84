//! Workout log page handlers.
//!
//! ```text
//! GET  /          home page with the add form and pending flash messages
//! POST /add       workout=Push+Ups&duration=15, then 303 to /
//! GET  /workouts  every recorded workout in insertion order
//! ```

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::warn;

use crate::domain::ports::WorkoutSummary;
use crate::domain::{WorkoutSubmission, WorkoutValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::flash::{FlashMessage, Flashes};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views;

const MISSING_FIELD_MESSAGE: &str = "Please enter both workout and duration.";
const INVALID_DURATION_MESSAGE: &str = "Duration must be a number.";

/// Longest workout name echoed back in a flash message, in characters.
pub(crate) const MAX_ECHOED_NAME_CHARS: usize = 100;

/// Form body for `POST /add`.
///
/// Both fields are optional at the wire level so absent and empty values
/// reach validation instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct AddWorkoutForm {
    pub workout: Option<String>,
    pub duration: Option<String>,
}

impl TryFrom<AddWorkoutForm> for WorkoutSubmission {
    type Error = WorkoutValidationError;

    fn try_from(form: AddWorkoutForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(form.workout.as_deref(), form.duration.as_deref())
    }
}

fn rejection_message(err: &WorkoutValidationError) -> &'static str {
    match err {
        WorkoutValidationError::MissingField { .. } => MISSING_FIELD_MESSAGE,
        WorkoutValidationError::InvalidDuration { .. } => INVALID_DURATION_MESSAGE,
    }
}

/// Shorten `name` for display in a flash message.
///
/// The full name is still stored; only the echo is cut so the message fits
/// the session cookie.
fn echoed_name(name: &str) -> String {
    match name.char_indices().nth(MAX_ECHOED_NAME_CHARS) {
        Some((cut, _)) => format!("{}...", &name[..cut]),
        None => name.to_owned(),
    }
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(body)
}

/// Render the home page, consuming pending flash messages.
#[get("/")]
pub async fn home(flashes: Flashes) -> HttpResponse {
    html(views::home_page(&flashes.take()))
}

/// Validate and record a submitted workout, then redirect home.
///
/// Validation failures are reported through a flash message rather than an
/// error status. A body that is not a urlencoded form counts as both fields
/// absent. Long names are shortened in the success message.
#[post("/add")]
pub async fn add_workout(
    state: web::Data<HttpState>,
    flashes: Flashes,
    form: Result<web::Form<AddWorkoutForm>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let form = form.map(web::Form::into_inner).unwrap_or_else(|err| {
        warn!(error = %err, "unreadable workout form; treating fields as absent");
        AddWorkoutForm::default()
    });

    let message = match WorkoutSubmission::try_from(form) {
        Ok(submission) => {
            let workout = state.record.record(submission).await?;
            FlashMessage::success(format!(
                "'{}' added successfully!",
                echoed_name(workout.name().as_ref())
            ))
        }
        Err(err) => {
            warn!(error = %err, "workout submission rejected");
            FlashMessage::error(rejection_message(&err))
        }
    };
    if let Err(err) = flashes.push(message) {
        // The workout may already be stored, so the redirect still goes out.
        warn!(error = %err, "flash message dropped");
    }

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish())
}

/// Render every recorded workout with a summary line.
#[get("/workouts")]
pub async fn list_workouts(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let workouts = state.workouts.list().await?;
    let summary = WorkoutSummary::from_workouts(&workouts);
    Ok(html(views::workouts_page(&workouts, summary)))
}

#[cfg(test)]
#[path = "workouts_tests.rs"]
mod tests;
