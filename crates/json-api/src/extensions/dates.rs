//! Date and datetime parsing for request values.

use jiff::{
    Timestamp,
    civil::{Date, DateTime},
    tz::TimeZone,
};
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use super::query::QueryTextExt as _;

/// Parse a `YYYY-MM-DD` calendar date.
pub(crate) fn parse_date(raw: &str, field: &str) -> Result<Date, StatusError> {
    let raw = raw.trim();

    // Date parsing is lenient about trailing time parts; plain dates only.
    if raw.len() != 10 {
        return Err(invalid_date(field));
    }

    raw.parse::<Date>().map_err(|_ignored| invalid_date(field))
}

/// Parse an ISO-8601 datetime. Values without an offset are read as UTC.
pub(crate) fn parse_datetime(raw: &str, field: &str) -> Result<Timestamp, StatusError> {
    let raw = raw.trim();

    if let Ok(timestamp) = raw.parse::<Timestamp>() {
        return Ok(timestamp);
    }

    raw.parse::<DateTime>()
        .and_then(|datetime| datetime.to_zoned(TimeZone::UTC))
        .map(|zoned| zoned.timestamp())
        .map_err(|_ignored| StatusError::bad_request().brief(format!("{field} is invalid datetime")))
}

fn invalid_date(field: &str) -> StatusError {
    StatusError::bad_request().brief(format!("{field} must be YYYY-MM-DD format"))
}

/// Optional date query parameters.
pub(crate) trait DateQueryExt {
    fn into_date(self, field: &str) -> Result<Option<Date>, StatusError>;
}

impl DateQueryExt for QueryParam<String, false> {
    fn into_date(self, field: &str) -> Result<Option<Date>, StatusError> {
        self.into_non_blank()
            .map(|value| parse_date(&value, field))
            .transpose()
    }
}
