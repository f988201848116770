//! Calendar date values with day-level comparison.
//!
//! Events are looked up by the calendar day they fall on, never by exact
//! timestamp. Each value carries its own frame of reference (UTC, a fixed
//! offset, an IANA zone, or none at all) and the day is always read in that
//! frame.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::DaybookError;

const DATE_FORMAT: &str = "%Y-%m-%d";
/// `%.f` prints fractional seconds only when there are any.
const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Accepted layouts for wall-clock input, most specific first.
const LOCAL_INPUT_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventDate {
    /// All-day value
    Date(NaiveDate),
    DateTimeUtc(DateTime<Utc>),
    /// An instant pinned to a fixed UTC offset (e.g. `+02:00`)
    DateTimeOffset(DateTime<FixedOffset>),
    /// Wall-clock time with no zone attached
    DateTimeFloating(NaiveDateTime),
    /// Wall-clock time in an IANA zone
    DateTimeZoned { datetime: NaiveDateTime, tzid: String },
}

impl EventDate {
    /// The day this value falls on, read in its own zone.
    pub fn calendar_day(&self) -> NaiveDate {
        match self {
            EventDate::Date(d) => *d,
            EventDate::DateTimeUtc(dt) => dt.date_naive(),
            EventDate::DateTimeOffset(dt) => dt.date_naive(),
            EventDate::DateTimeFloating(dt) => dt.date(),
            EventDate::DateTimeZoned { datetime, .. } => datetime.date(),
        }
    }

    /// The instant this value denotes, if it carries one.
    ///
    /// Ambiguous local times (DST fall-back) resolve to the earliest mapping.
    /// Local times skipped by a DST jump, unknown zones, all-day and floating
    /// values have no instant.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            EventDate::DateTimeUtc(dt) => Some(*dt),
            EventDate::DateTimeOffset(dt) => Some(dt.with_timezone(&Utc)),
            EventDate::DateTimeZoned { datetime, tzid } => {
                let tz: Tz = tzid.parse().ok()?;
                tz.from_local_datetime(datetime)
                    .earliest()
                    .map(|dt| dt.with_timezone(&Utc))
            }
            EventDate::Date(_) | EventDate::DateTimeFloating(_) => None,
        }
    }

    /// The IANA zone of a zoned value, when the tzid is known to chrono-tz.
    pub fn timezone(&self) -> Option<Tz> {
        match self {
            EventDate::DateTimeZoned { tzid, .. } => tzid.parse().ok(),
            _ => None,
        }
    }

    /// The day `self` falls on when seen from `reference`'s zone.
    ///
    /// Converts when `self` carries an instant and `reference` names a zone
    /// (UTC, an offset or a known tzid). The reference's own instant doesn't
    /// matter, so a zoned local time skipped by DST still has a zone.
    /// Otherwise the value's own calendar day is used.
    pub fn day_in_zone_of(&self, reference: &EventDate) -> NaiveDate {
        let Some(instant) = self.to_utc() else {
            return self.calendar_day();
        };

        match reference {
            EventDate::DateTimeUtc(_) => instant.date_naive(),
            EventDate::DateTimeOffset(dt) => instant.with_timezone(dt.offset()).date_naive(),
            EventDate::DateTimeZoned { .. } => match reference.timezone() {
                Some(tz) => instant.with_timezone(&tz).date_naive(),
                None => self.calendar_day(),
            },
            EventDate::Date(_) | EventDate::DateTimeFloating(_) => self.calendar_day(),
        }
    }

    /// Whether `other` falls on the same calendar day as `self`, judged in
    /// `self`'s zone. Time of day is ignored.
    pub fn is_same_day(&self, other: &EventDate) -> bool {
        self.calendar_day() == other.day_in_zone_of(self)
    }

    /// Attach `tz` to a floating value. Every other variant is returned as is.
    pub fn with_timezone(self, tz: Tz) -> EventDate {
        match self {
            EventDate::DateTimeFloating(datetime) => EventDate::DateTimeZoned {
                datetime,
                tzid: tz.name().to_string(),
            },
            other => other,
        }
    }

    /// True for all-day values.
    pub fn is_all_day(&self) -> bool {
        matches!(self, EventDate::Date(_))
    }
}

/// Day-level equality of two dates, judged in `a`'s zone.
pub fn same_calendar_day(a: &EventDate, b: &EventDate) -> bool {
    a.is_same_day(b)
}

impl From<NaiveDate> for EventDate {
    fn from(date: NaiveDate) -> Self {
        EventDate::Date(date)
    }
}

impl From<DateTime<Utc>> for EventDate {
    fn from(dt: DateTime<Utc>) -> Self {
        EventDate::DateTimeUtc(dt)
    }
}

impl From<DateTime<FixedOffset>> for EventDate {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        if dt.offset().local_minus_utc() == 0 {
            EventDate::DateTimeUtc(dt.with_timezone(&Utc))
        } else {
            EventDate::DateTimeOffset(dt)
        }
    }
}

impl From<NaiveDateTime> for EventDate {
    fn from(dt: NaiveDateTime) -> Self {
        EventDate::DateTimeFloating(dt)
    }
}

impl FromStr for EventDate {
    type Err = DaybookError;

    /// Parse one of:
    /// - `2024-05-01` (all-day)
    /// - `2024-05-01T09:00` or `2024-05-01T09:00:00` (floating)
    /// - `2024-05-01T09:00:00Z` or `2024-05-01T09:00:00+02:00` (RFC 3339)
    /// - `2024-05-01T09:00[Europe/Amsterdam]` (zoned)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some((local, rest)) = s.split_once('[') {
            let tzid = rest
                .strip_suffix(']')
                .ok_or_else(|| DaybookError::InvalidDate(format!("unterminated zone in '{s}'")))?;
            let tz: Tz = tzid
                .parse()
                .map_err(|_| DaybookError::UnknownTimezone(tzid.to_string()))?;
            let datetime = parse_local(local)
                .ok_or_else(|| DaybookError::InvalidDate(format!("'{local}' is not a date-time")))?;

            return Ok(EventDate::DateTimeZoned {
                datetime,
                tzid: tz.name().to_string(),
            });
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
            return Ok(EventDate::Date(date));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(EventDate::from(dt));
        }

        if let Some(dt) = parse_local(s) {
            return Ok(EventDate::DateTimeFloating(dt));
        }

        Err(DaybookError::InvalidDate(format!(
            "'{s}'. Expected YYYY-MM-DD, YYYY-MM-DDTHH:MM, RFC 3339 or YYYY-MM-DDTHH:MM[Area/City]"
        )))
    }
}

fn parse_local(s: &str) -> Option<NaiveDateTime> {
    LOCAL_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventDate::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            EventDate::DateTimeUtc(dt) => write!(f, "{}Z", dt.format(LOCAL_FORMAT)),
            EventDate::DateTimeOffset(dt) => write!(f, "{}", dt.to_rfc3339()),
            EventDate::DateTimeFloating(dt) => write!(f, "{}", dt.format(LOCAL_FORMAT)),
            EventDate::DateTimeZoned { datetime, tzid } => {
                write!(f, "{}[{}]", datetime.format(LOCAL_FORMAT), tzid)
            }
        }
    }
}
