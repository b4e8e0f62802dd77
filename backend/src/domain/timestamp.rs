//! Timestamp and calendar-day parsing shared by every endpoint.
//!
//! All instants are normalized to UTC. Inputs without an offset are treated as
//! UTC wall-clock time; day windows run from 00:00 UTC to the next midnight.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::Error;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raised when text is neither an ISO 8601 timestamp nor a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{value}` is not an ISO 8601 timestamp")]
pub struct TimestampError {
    value: String,
}

/// Parse an ISO 8601 instant.
///
/// Offsets are honoured; naive values and bare dates are read as UTC.
///
/// # Examples
/// ```
/// use daybook::domain::parse_timestamp;
///
/// let with_offset = parse_timestamp("2024-03-01T10:00:00+02:00").unwrap();
/// let naive = parse_timestamp("2024-03-01T08:00:00").unwrap();
/// assert_eq!(with_offset, naive);
/// ```
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    let value = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| TimestampError {
            value: value.to_owned(),
        })
}

/// Parse a calendar date, accepting either `YYYY-MM-DD` or a full timestamp.
pub fn parse_date(raw: &str) -> Result<NaiveDate, TimestampError> {
    let value = raw.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| parse_timestamp(value).map(|instant| instant.date_naive()))
}

/// Parse a named request field, reporting failures as `invalid_request`.
pub fn parse_timestamp_field(field: &str, raw: &str) -> Result<DateTime<Utc>, Error> {
    parse_timestamp(raw).map_err(|err| invalid_field(field, &err))
}

/// Date counterpart of [`parse_timestamp_field`].
pub fn parse_date_field(field: &str, raw: &str) -> Result<NaiveDate, Error> {
    parse_date(raw).map_err(|err| invalid_field(field, &err))
}

fn invalid_field(field: &str, err: &TimestampError) -> Error {
    Error::invalid_request(format!("{field}: {err}"))
        .with_details(serde_json::json!({ "field": field }))
}

/// Half-open UTC interval `[start, start + 24h)` covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    start: DateTime<Utc>,
}

impl DayWindow {
    /// Window covering `date` in UTC.
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            start: date.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// The UTC day containing `now`.
    #[must_use]
    pub fn containing(now: DateTime<Utc>) -> Self {
        Self::for_date(now.date_naive())
    }

    /// Resolve an optional `date` query value, defaulting to the day of `now`.
    pub fn resolve(date: Option<&str>, now: DateTime<Utc>) -> Result<Self, Error> {
        match date.map(str::trim).filter(|value| !value.is_empty()) {
            Some(raw) => parse_date_field("date", raw).map(Self::for_date),
            None => Ok(Self::containing(now)),
        }
    }

    /// Inclusive start.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::days(1)
    }

    /// Calendar date of the window.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Whether `instant` falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end()
    }
}
