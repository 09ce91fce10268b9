//! Time handling utilities for catalog records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, Result};

/// Parse an ISO 8601 / RFC 3339 timestamp into UTC.
///
/// Accepts a full timestamp with offset, a naive timestamp (assumed UTC)
/// or a bare date (midnight UTC).
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Utc.from_utc_datetime(&ndt));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ndt) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&ndt));
        }
    }

    Err(FrameError::InvalidTime(s.to_string()))
}

/// A closed time interval, either end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Parse a catalog search interval.
    ///
    /// Supports:
    /// - Single instant: "2021-07-01T08:00:00Z"
    /// - Closed range: "2021-07-01T08:00:00Z/2021-07-01T10:00:00Z"
    /// - Open ranges: "../2021-07-01T10:00:00Z", "2021-07-01T08:00:00Z/.."
    pub fn from_interval(s: &str) -> Result<Self> {
        let Some((start, end)) = s.split_once('/') else {
            let instant = parse_datetime(s)?;
            return Ok(Self::new(Some(instant), Some(instant)));
        };

        let parse_end = |part: &str| -> Result<Option<DateTime<Utc>>> {
            match part.trim() {
                "" | ".." => Ok(None),
                value => parse_datetime(value).map(Some),
            }
        };

        let range = Self::new(parse_end(start)?, parse_end(end)?);
        if let (Some(start), Some(end)) = (range.start, range.end) {
            if start > end {
                return Err(FrameError::InvalidTime(format!(
                    "interval start is after its end: {}",
                    s
                )));
            }
        }
        Ok(range)
    }

    pub fn contains(&self, dt: &DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| dt >= &start) && self.end.map_or(true, |end| dt <= &end)
    }
}
