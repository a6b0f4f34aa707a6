//! Due date handling.
//!
//! Input is strict: [`normalize_due_date`] accepts exactly two shapes and
//! rejects everything else. Display is lenient: [`DueState::derive`] never
//! fails, so a malformed value already in the database only shows up as
//! "invalid date".

use crate::error::{Result, TodoError};
use chrono::NaiveDate;

pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

pub const NOT_SET_LABEL: &str = "not set";
pub const INVALID_LABEL: &str = "invalid date";

/// Turn user-entered text into the canonical `YYYY-MM-DD` form.
///
/// `YYYYMMDD` is tried first, then `YYYY-MM-DD`. The date must exist on the
/// calendar (`20240230` is rejected). Surrounding whitespace is not stripped.
pub fn normalize_due_date(input: &str) -> Result<String> {
    parse_compact(input)
        .or_else(|| parse_dashed(input))
        .map(|date| date.format(CANONICAL_FORMAT).to_string())
        .ok_or_else(|| TodoError::InvalidDateFormat(input.to_string()))
}

fn parse_compact(s: &str) -> Option<NaiveDate> {
    let b = s.as_bytes();
    if b.len() != 8 || !b.iter().all(u8::is_ascii_digit) {
        return None;
    }
    ymd(&s[0..4], &s[4..6], &s[6..8])
}

/// Strict `YYYY-MM-DD`; also the only shape accepted when reading back.
fn parse_dashed(s: &str) -> Option<NaiveDate> {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }
    let digits_ok = b
        .iter()
        .enumerate()
        .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    ymd(&s[0..4], &s[5..7], &s[8..10])
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// What the list shows for a task's due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueState {
    NotSet,
    /// Stored text that is not a canonical date.
    Invalid,
    Upcoming(NaiveDate),
    /// Strictly before today.
    Overdue(NaiveDate),
}

impl DueState {
    pub fn derive(stored: Option<&str>, today: NaiveDate) -> Self {
        let Some(raw) = stored else {
            return DueState::NotSet;
        };
        match parse_dashed(raw) {
            Some(date) if date < today => DueState::Overdue(date),
            Some(date) => DueState::Upcoming(date),
            None => DueState::Invalid,
        }
    }

    pub fn label(&self) -> String {
        match self {
            DueState::NotSet => NOT_SET_LABEL.to_string(),
            DueState::Invalid => INVALID_LABEL.to_string(),
            DueState::Upcoming(date) | DueState::Overdue(date) => {
                date.format(CANONICAL_FORMAT).to_string()
            }
        }
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, DueState::Overdue(_))
    }
}
