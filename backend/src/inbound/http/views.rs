//! Server-rendered HTML pages.
//!
//! Pages are small enough to assemble directly. Every piece of user-supplied
//! text passes through [`escape`] before it is written into markup.

use crate::domain::Workout;
use crate::domain::ports::WorkoutSummary;

use super::flash::FlashMessage;

const TITLE: &str = "Workout Tracker";

/// Escape text for inclusion in HTML element content or attribute values.
///
/// # Examples
/// ```
/// use workout_log::inbound::http::views::escape;
///
/// assert_eq!(escape("<b>Tom & 'Jerry'</b>"), "&lt;b&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(heading: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{TITLE} - {heading}</title>\n\
         </head>\n\
         <body>\n\
         <h1>{TITLE}</h1>\n\
         {body}\
         </body>\n\
         </html>\n",
        heading = escape(heading),
    )
}

fn flash_list(messages: &[FlashMessage]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|m| {
            format!(
                "<li class=\"flash flash-{}\">{}</li>\n",
                m.category().as_str(),
                escape(m.message())
            )
        })
        .collect();
    format!("<ul class=\"flashes\">\n{items}</ul>\n")
}

/// Home page with the add-workout form and any pending flash messages.
#[must_use]
pub fn home_page(messages: &[FlashMessage]) -> String {
    let body = format!(
        "{flashes}\
         <h2>Add Workout</h2>\n\
         <form method=\"post\" action=\"/add\">\n\
         <label for=\"workout\">Workout</label>\n\
         <input type=\"text\" id=\"workout\" name=\"workout\">\n\
         <label for=\"duration\">Duration (minutes)</label>\n\
         <input type=\"number\" id=\"duration\" name=\"duration\">\n\
         <button type=\"submit\">Add</button>\n\
         </form>\n\
         <p><a href=\"/workouts\">View workouts</a></p>\n",
        flashes = flash_list(messages),
    );
    layout("Home", &body)
}

fn workout_row(workout: &Workout) -> String {
    format!(
        "<tr><td>{}</td><td>{} min</td><td>{}</td></tr>\n",
        escape(workout.name().as_ref()),
        workout.duration(),
        workout.recorded_at().format("%Y-%m-%d %H:%M UTC"),
    )
}

/// Listing of every recorded workout in insertion order.
#[must_use]
pub fn workouts_page(workouts: &[Workout], summary: WorkoutSummary) -> String {
    let listing = if workouts.is_empty() {
        "<p class=\"empty\">No workouts logged yet.</p>\n".to_owned()
    } else {
        let rows: String = workouts.iter().map(workout_row).collect();
        format!(
            "<table>\n\
             <thead><tr><th>Workout</th><th>Duration</th><th>Recorded</th></tr></thead>\n\
             <tbody>\n{rows}</tbody>\n\
             </table>\n"
        )
    };
    let body = format!(
        "<h2>Workouts</h2>\n\
         {listing}\
         <p class=\"summary\">{count} workouts, {total} minutes total</p>\n\
         <p><a href=\"/\">Add another workout</a></p>\n",
        count = summary.count,
        total = summary.total_minutes,
    );
    layout("Workouts", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WorkoutSubmission;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn workout(name: &str, minutes: &str) -> Workout {
        let submission =
            WorkoutSubmission::try_from_parts(Some(name), Some(minutes)).expect("valid input");
        let at = Utc
            .with_ymd_and_hms(2024, 5, 1, 7, 30, 0)
            .single()
            .expect("valid timestamp");
        Workout::record(submission, at)
    }

    #[rstest]
    fn home_page_shows_form_and_flashes() {
        let html = home_page(&[FlashMessage::error("Duration must be a number.")]);
        assert!(html.contains("Add Workout"));
        assert!(html.contains("action=\"/add\""));
        assert!(html.contains("name=\"workout\""));
        assert!(html.contains("name=\"duration\""));
        assert!(html.contains("<li class=\"flash flash-error\">Duration must be a number.</li>"));
    }

    #[rstest]
    fn home_page_without_flashes_has_no_list() {
        assert!(!home_page(&[]).contains("class=\"flashes\""));
    }

    #[rstest]
    fn workouts_page_lists_rows_in_order() {
        let workouts = vec![workout("Push Ups", "15"), workout("Plank", "3")];
        let html = workouts_page(&workouts, WorkoutSummary::from_workouts(&workouts));
        let first = html.find("Push Ups").expect("first row");
        let second = html.find("Plank").expect("second row");
        assert!(first < second);
        assert!(html.contains("<td>15 min</td>"));
        assert!(html.contains("2024-05-01 07:30 UTC"));
        assert!(html.contains("2 workouts, 18 minutes total"));
    }

    #[rstest]
    fn workouts_page_has_empty_placeholder() {
        let html = workouts_page(&[], WorkoutSummary::default());
        assert!(html.contains("No workouts logged yet."));
        assert!(!html.contains("<table>"));
    }

    #[rstest]
    fn workout_names_are_escaped() {
        let workouts = vec![workout("<script>alert(1)</script>", "1")];
        let html = workouts_page(&workouts, WorkoutSummary::from_workouts(&workouts));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }
}
