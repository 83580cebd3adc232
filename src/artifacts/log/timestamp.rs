//! Commit dates of log entries
//!
//! Classic RCS prints `2010/01/24 14:20:12` (always UTC), CVS 1.12 prints
//! `2010-01-24 14:20:12 +0000`. Old `rlog` builds print two-digit years and
//! treat them as 1900-based, so years before the epoch get moved a century
//! forward.

use crate::errors::{RcsError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

const EPOCH_YEAR: i32 = 1970;

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let invalid = |reason: &str| RcsError::InvalidDate {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = value.split_whitespace();
    let date = parts.next().ok_or_else(|| invalid("missing date"))?;
    let time = parts.next().ok_or_else(|| invalid("missing time"))?;
    let offset = parts.next();
    if parts.next().is_some() {
        return Err(invalid("unexpected trailing text"));
    }

    let fields = date.split(['/', '-']).collect::<Vec<_>>();
    let [year, month, day] = fields.as_slice() else {
        return Err(invalid("expected year, month and day"));
    };
    let year = year
        .parse::<i32>()
        .map_err(|_| invalid("non-numeric year"))?;
    let month = month
        .parse::<u32>()
        .map_err(|_| invalid("non-numeric month"))?;
    let day = day.parse::<u32>().map_err(|_| invalid("non-numeric day"))?;

    let year = rebase_year(year).ok_or_else(|| invalid("year before 1970"))?;
    let date =
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid("no such calendar day"))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S").map_err(|_| invalid("invalid time"))?;

    let offset = match offset {
        Some(offset) => parse_offset(offset),
        None => FixedOffset::east_opt(0),
    }
    .ok_or_else(|| invalid("invalid utc offset"))?;

    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .ok_or_else(|| invalid("ambiguous local time"))
}

/// Map two-digit and pre-epoch years into the 1970..2069 window
fn rebase_year(year: i32) -> Option<i32> {
    let mut year = if year < 100 { year + 1900 } else { year };

    if year < EPOCH_YEAR {
        if year - 1900 < 70 {
            year += 100;
        }
        if year < EPOCH_YEAR {
            return None;
        }
    }

    Some(year)
}

/// `+0100`, `-0530` or `+01:00`
fn parse_offset(value: &str) -> Option<FixedOffset> {
    let (sign, digits) = match value.split_at_checked(1)? {
        ("+", digits) => (1, digits),
        ("-", digits) => (-1, digits),
        _ => return None,
    };
    let digits = digits.replace(':', "");
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let hours = digits[..2].parse::<i32>().ok()?;
    let minutes = digits[2..].parse::<i32>().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
