//! Turning user-typed dates into `EventDate`s.
//!
//! Exact forms (`2024-05-01`, `2024-05-01T09:00`, RFC 3339, zoned) are tried
//! first, then natural language via fuzzydate. Wall-clock results are placed
//! in the session's zone when there is one.

use anyhow::{Result, anyhow};
use chrono::{Days, NaiveDate};
use chrono_tz::Tz;
use daybook_core::EventDate;

pub fn parse_date(input: &str, tz: Option<Tz>, today: NaiveDate) -> Result<EventDate> {
    let trimmed = input.trim();

    let relative = match trimmed.to_lowercase().as_str() {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        _ => None,
    };
    if let Some(day) = relative {
        return Ok(EventDate::Date(day));
    }

    if let Ok(date) = trimmed.parse::<EventDate>() {
        return Ok(in_zone(date, tz));
    }

    let expanded = expand_abbreviations(trimmed);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow!("Could not parse date: \"{}\"", input))?;

    if has_time_component(trimmed) {
        Ok(in_zone(EventDate::DateTimeFloating(dt), tz))
    } else {
        Ok(EventDate::Date(dt.date()))
    }
}

fn in_zone(date: EventDate, tz: Option<Tz>) -> EventDate {
    match tz {
        Some(tz) => date.with_timezone(tz),
        None => date,
    }
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the input names a time of day (am/pm, HH:MM, noon, midnight, "at 3").
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains("noon") || lower.contains("midnight") {
        return true;
    }

    let bytes = lower.as_bytes();

    // "6pm", "6 pm", "11am"
    for i in 0..bytes.len().saturating_sub(1) {
        if (bytes[i] == b'a' || bytes[i] == b'p') && bytes[i + 1] == b'm' {
            if i > 0 && bytes[i - 1].is_ascii_digit() {
                return true;
            }
            if i > 1 && bytes[i - 1] == b' ' && bytes[i - 2].is_ascii_digit() {
                return true;
            }
        }
    }

    // HH:MM
    if bytes
        .windows(3)
        .any(|w| w[0].is_ascii_digit() && w[1] == b':' && w[2].is_ascii_digit())
    {
        return true;
    }

    let after_at = lower
        .find(" at ")
        .map(|pos| &lower[pos + 4..])
        .or_else(|| lower.strip_prefix("at "));

    after_at.is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
}
