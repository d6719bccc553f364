//! Display formatting for the matched date/time text.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayDateError {
    #[error("unparseable statement date '{0}'")]
    Date(String),
    #[error("unparseable statement time '{0}'")]
    Time(String),
}

fn squash(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// "Jan 5, 2024" (any case, any spacing)
pub fn parse_statement_date(raw: &str) -> Result<NaiveDate, DisplayDateError> {
    NaiveDate::parse_from_str(&squash(raw), "%b %d, %Y")
        .map_err(|_| DisplayDateError::Date(raw.to_string()))
}

/// "10:30 AM" (any case)
pub fn parse_statement_time(raw: &str) -> Result<NaiveTime, DisplayDateError> {
    NaiveTime::parse_from_str(&squash(raw).to_uppercase(), "%I:%M %p")
        .map_err(|_| DisplayDateError::Time(raw.to_string()))
}

/// Strict formatting: "5 Jan 2024, 10:30 am" or "5 Jan 2024".
pub fn try_format_display_date(
    raw_date: &str,
    raw_time: Option<&str>,
) -> Result<String, DisplayDateError> {
    let date = parse_statement_date(raw_date)?;
    match raw_time {
        Some(t) => {
            let dt = NaiveDateTime::new(date, parse_statement_time(t)?);
            Ok(dt.format("%-d %b %Y, %-I:%M %P").to_string())
        }
        None => Ok(date.format("%-d %b %Y").to_string()),
    }
}

/// Lenient formatting used for the preview; degrades to the raw text.
pub fn format_display_date(raw_date: &str, raw_time: Option<&str>) -> String {
    try_format_display_date(raw_date, raw_time).unwrap_or_else(|e| {
        debug!(error = %e, "falling back to raw statement date");
        match raw_time {
            Some(t) => format!("{raw_date} {t}"),
            None => raw_date.to_string(),
        }
    })
}
