//! Terminal rendering for daybook types.

use chrono::NaiveDate;
use daybook_core::{Event, EventDate};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let title = if self.title.is_empty() {
            "(No title)".dimmed().to_string()
        } else {
            self.title.clone()
        };
        let id = format!("[{}]", self.id);

        format!("  {} {} {}", format_time(&self.date), title, id.dimmed())
    }
}

/// Format the time portion of a date (e.g. "  15:00" or "all-day")
pub fn format_time(date: &EventDate) -> String {
    match date {
        EventDate::Date(_) => "all-day".to_string(),
        EventDate::DateTimeUtc(dt) => format!("{:>7}", dt.format("%H:%MZ").to_string()),
        EventDate::DateTimeOffset(dt) => format!("{:>7}", dt.format("%H:%M").to_string()),
        EventDate::DateTimeFloating(dt) => format!("{:>7}", dt.format("%H:%M").to_string()),
        EventDate::DateTimeZoned { datetime, .. } => {
            format!("{:>7}", datetime.format("%H:%M").to_string())
        }
    }
}

/// Day heading, e.g. "Today", "Tomorrow" or `day_format` applied to the date.
pub fn day_heading(day: NaiveDate, today: NaiveDate, day_format: &str) -> String {
    let label = match (day - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => day.format(day_format).to_string(),
    };
    label.bold().to_string()
}

/// Render events under a single day heading.
pub fn render_day(events: &[Event], day: NaiveDate, today: NaiveDate, day_format: &str) -> String {
    let mut lines = vec![day_heading(day, today, day_format)];

    if events.is_empty() {
        lines.push(format!("  {}", "No events".dimmed()));
    } else {
        lines.extend(events.iter().map(|event| event.render()));
    }

    lines.join("\n")
}

/// Render events in the given order, starting a new heading whenever the day changes.
pub fn render_list(events: &[Event], today: NaiveDate, day_format: &str) -> String {
    if events.is_empty() {
        return "No events".dimmed().to_string();
    }

    let mut lines = Vec::new();
    let mut current_day: Option<NaiveDate> = None;

    for event in events {
        let day = event.date.calendar_day();
        if current_day != Some(day) {
            if current_day.is_some() {
                lines.push(String::new());
            }
            lines.push(day_heading(day, today, day_format));
            current_day = Some(day);
        }
        lines.push(event.render());
    }

    lines.join("\n")
}
