//! Input validation rules.
//!
//! # Responsibility
//! - Check user-entered fields before they reach the store.
//! - Gate task removal on completion status.
//!
//! # Invariants
//! - Validators are pure: no I/O, no store access.
//! - Successful validation returns the parsed value where one exists.

use crate::model::task::{Task, TaskId, TaskStatus};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});
static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Email does not match `local@domain.tld`.
    InvalidEmail(String),
    /// Date is not a real `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// Status is not one of `todo|in-progress|done`.
    InvalidStatus(String),
    /// A required text field is blank after trim.
    BlankField(&'static str),
    /// Task removal attempted before the task is done.
    TaskNotDone { id: TaskId, status: TaskStatus },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(value) => write!(f, "invalid email format: `{value}`"),
            Self::InvalidDate(value) => {
                write!(f, "invalid date format: `{value}`; use YYYY-MM-DD")
            }
            Self::InvalidStatus(value) => write!(
                f,
                "invalid task status: `{value}`; must be one of todo|in-progress|done"
            ),
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::TaskNotDone { id, status } => write!(
                f,
                "cannot remove task {id}: status is `{status}`, not `done`"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Accepts addresses shaped like `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// Single-digit months/days and impossible dates (`2023-02-30`) are rejected.
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    if !DATE_SHAPE_RE.is_match(value) {
        return Err(ValidationError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Parses an exact status wire string.
pub fn validate_status(value: &str) -> Result<TaskStatus, ValidationError> {
    TaskStatus::parse(value).ok_or_else(|| ValidationError::InvalidStatus(value.to_string()))
}

/// Passes only when `task` is done and may therefore be removed.
pub fn validate_complete_task(task: &Task) -> Result<(), ValidationError> {
    if task.is_done() {
        Ok(())
    } else {
        Err(ValidationError::TaskNotDone {
            id: task.id(),
            status: task.status,
        })
    }
}

/// Rejects empty or whitespace-only values for `field`.
pub fn validate_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::BlankField(field))
    } else {
        Ok(())
    }
}
