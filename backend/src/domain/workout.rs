//! Workout records and the validation that guards their construction.
//!
//! A [`Workout`] can only be built from a [`WorkoutSubmission`], and a
//! submission can only be built by [`WorkoutSubmission::try_from_parts`], so
//! every record that reaches the store carries a non-empty name and an
//! integer duration.

use std::fmt;

use chrono::{DateTime, Utc};

/// Form field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkoutField {
    /// The workout name (`workout` form field).
    Workout,
    /// The duration in minutes (`duration` form field).
    Duration,
}

impl WorkoutField {
    /// Wire name of the field as submitted by the form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Duration => "duration",
        }
    }
}

impl fmt::Display for WorkoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a submission is rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkoutValidationError {
    /// A required field was absent or empty.
    #[error("missing required field: {field}")]
    MissingField { field: WorkoutField },
    /// The duration could not be parsed as an integer.
    #[error("duration must be an integer, got '{value}'")]
    InvalidDuration { value: String },
}

/// Non-empty workout name. Whitespace-only and duplicate names are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutName(String);

impl WorkoutName {
    /// Validate and construct a [`WorkoutName`].
    pub fn new(name: impl Into<String>) -> Result<Self, WorkoutValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(WorkoutValidationError::MissingField {
                field: WorkoutField::Workout,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for WorkoutName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for WorkoutName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Workout duration in minutes.
///
/// Any signed integer is accepted; the form does not constrain the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutDuration(i64);

impl WorkoutDuration {
    /// Parse a duration from submitted text, tolerating surrounding whitespace
    /// and single underscores between digits.
    ///
    /// # Examples
    /// ```
    /// use workout_log::domain::WorkoutDuration;
    ///
    /// assert_eq!(WorkoutDuration::parse(" 15 ").expect("integer").minutes(), 15);
    /// assert_eq!(WorkoutDuration::parse("1_000").expect("integer").minutes(), 1000);
    /// assert!(WorkoutDuration::parse("abc").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, WorkoutValidationError> {
        without_digit_separators(raw.trim())
            .and_then(|digits| digits.parse::<i64>().ok())
            .map(Self)
            .ok_or_else(|| WorkoutValidationError::InvalidDuration {
                value: raw.to_owned(),
            })
    }

    /// Duration in minutes.
    #[must_use]
    pub const fn minutes(self) -> i64 {
        self.0
    }
}

/// Drop `_` separators, or `None` if one is not flanked by digits.
fn without_digit_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let flanked = |at: usize| {
        let before = at.checked_sub(1).and_then(|i| bytes.get(i));
        let after = bytes.get(at + 1);
        before.is_some_and(u8::is_ascii_digit) && after.is_some_and(u8::is_ascii_digit)
    };
    let all_flanked = bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'_')
        .all(|(at, _)| flanked(at));
    all_flanked.then(|| text.replace('_', ""))
}

impl From<i64> for WorkoutDuration {
    fn from(minutes: i64) -> Self {
        Self(minutes)
    }
}

impl fmt::Display for WorkoutDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated input for recording a workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutSubmission {
    name: WorkoutName,
    duration: WorkoutDuration,
}

impl WorkoutSubmission {
    /// Construct a submission from already-validated parts.
    #[must_use]
    pub fn new(name: WorkoutName, duration: WorkoutDuration) -> Self {
        Self { name, duration }
    }

    /// Validate raw form values.
    ///
    /// Presence is checked for both fields before the duration is parsed, so
    /// a missing name wins over an unparseable duration.
    ///
    /// # Examples
    /// ```
    /// use workout_log::domain::{WorkoutField, WorkoutSubmission, WorkoutValidationError};
    ///
    /// let ok = WorkoutSubmission::try_from_parts(Some("Push Ups"), Some("15")).expect("valid");
    /// assert_eq!(ok.duration().minutes(), 15);
    ///
    /// let err = WorkoutSubmission::try_from_parts(Some("Plank"), Some("")).unwrap_err();
    /// assert_eq!(err, WorkoutValidationError::MissingField { field: WorkoutField::Duration });
    /// ```
    pub fn try_from_parts(
        name: Option<&str>,
        duration: Option<&str>,
    ) -> Result<Self, WorkoutValidationError> {
        let name = name.unwrap_or_default();
        let duration = duration.unwrap_or_default();
        let name = WorkoutName::new(name)?;
        if duration.is_empty() {
            return Err(WorkoutValidationError::MissingField {
                field: WorkoutField::Duration,
            });
        }
        let duration = WorkoutDuration::parse(duration)?;
        Ok(Self::new(name, duration))
    }

    /// Submitted name.
    #[must_use]
    pub fn name(&self) -> &WorkoutName {
        &self.name
    }

    /// Submitted duration.
    #[must_use]
    pub fn duration(&self) -> WorkoutDuration {
        self.duration
    }
}

/// A workout held by the store.
///
/// ## Invariants
/// - `name` is non-empty.
/// - `recorded_at` is the clock reading when the record was appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    name: WorkoutName,
    duration: WorkoutDuration,
    recorded_at: DateTime<Utc>,
}

impl Workout {
    /// Stamp a validated submission with its recording time.
    #[must_use]
    pub fn record(submission: WorkoutSubmission, recorded_at: DateTime<Utc>) -> Self {
        let WorkoutSubmission { name, duration } = submission;
        Self {
            name,
            duration,
            recorded_at,
        }
    }

    /// Workout name.
    #[must_use]
    pub fn name(&self) -> &WorkoutName {
        &self.name
    }

    /// Duration in minutes.
    #[must_use]
    pub fn duration(&self) -> WorkoutDuration {
        self.duration
    }

    /// When the workout was recorded.
    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
