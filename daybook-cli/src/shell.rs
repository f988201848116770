//! Line-oriented command language over one in-memory event store.
//!
//! Each line is parsed with clap, so `help` and `<command> --help` work the
//! same way they do for the `daybook` binary itself.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use daybook_core::{DaybookConfig, Event, EventDate, EventStore};
use owo_colors::OwoColorize;
use tracing::debug;

use crate::date_input::parse_date;
use crate::render::{Render, render_day, render_list};

#[derive(Parser)]
#[command(name = "daybook", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Add an event
    Add {
        /// Id for the event (a random one is generated if omitted)
        #[arg(long)]
        id: Option<String>,

        /// Date or date-time (e.g. 2024-05-01, 2024-05-01T09:00, "tomorrow 3pm")
        date: String,

        /// Title (may be empty)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        title: Vec<String>,
    },
    /// Replace the first event with the given id
    Update {
        id: String,
        date: String,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        title: Vec<String>,
    },
    /// Remove every event with the given id
    Delete { id: String },
    /// Show events on a day
    On {
        date: String,

        #[arg(long)]
        json: bool,
    },
    /// Show every event in insertion order
    List {
        #[arg(long)]
        json: bool,
    },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// What the caller should do after a line ran.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Print(String),
    Nothing,
    Quit,
}

pub struct Session {
    store: EventStore,
    tz: Option<Tz>,
    day_format: String,
    today: Option<NaiveDate>,
}

impl Session {
    pub fn new(store: EventStore, tz: Option<Tz>, config: &DaybookConfig) -> Self {
        Session {
            store,
            tz,
            day_format: config.day_format.clone(),
            today: None,
        }
    }

    /// Pin "today" instead of reading the clock.
    #[cfg(test)]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| match self.tz {
            Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
            None => Local::now().date_naive(),
        })
    }

    fn date(&self, input: &str) -> Result<EventDate> {
        parse_date(input, self.tz, self.today())
    }

    /// Run one line. Blank lines and `#` comments do nothing.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Outcome::Nothing);
        }

        let words = split_words(trimmed)?;
        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                return Ok(Outcome::Print(e.render().to_string().trim_end().to_string()));
            }
            Err(e) => anyhow::bail!("{}", e.render().to_string().trim_end()),
        };

        debug!(line = trimmed, "shell command");

        match parsed.command {
            ShellCommand::Add { id, date, title } => {
                let event = Event::new(
                    id.unwrap_or_else(Event::generate_id),
                    title.join(" "),
                    self.date(&date)?,
                );
                let message = format!("Added: {}", event.render().trim_start());
                self.store.add_event(event);
                Ok(Outcome::Print(message.green().to_string()))
            }
            ShellCommand::Update { id, date, title } => {
                let event = Event::new(id, title.join(" "), self.date(&date)?);
                let known = self.store.events().iter().any(|e| e.id == event.id);
                let message = if known {
                    format!("Updated: {}", event.render().trim_start())
                        .yellow()
                        .to_string()
                } else {
                    format!("No event with id '{}', nothing updated", event.id)
                        .dimmed()
                        .to_string()
                };
                self.store.update_event(event);
                Ok(Outcome::Print(message))
            }
            ShellCommand::Delete { id } => {
                let before = self.store.len();
                self.store.delete_event(&id);
                let removed = before - self.store.len();

                let message = match removed {
                    0 => format!("No event with id '{}'", id).dimmed().to_string(),
                    1 => "Deleted 1 event".red().to_string(),
                    n => format!("Deleted {} events", n).red().to_string(),
                };
                Ok(Outcome::Print(message))
            }
            ShellCommand::On { date, json } => {
                let date = self.date(&date)?;
                let events = self.store.events_by_date(&date);

                if json {
                    let out = serde_json::to_string_pretty(&events)
                        .context("Failed to serialize events")?;
                    return Ok(Outcome::Print(out));
                }

                Ok(Outcome::Print(render_day(
                    &events,
                    date.calendar_day(),
                    self.today(),
                    &self.day_format,
                )))
            }
            ShellCommand::List { json } => {
                if json {
                    let out = serde_json::to_string_pretty(self.store.events())
                        .context("Failed to serialize events")?;
                    return Ok(Outcome::Print(out));
                }

                Ok(Outcome::Print(render_list(
                    self.store.events(),
                    self.today(),
                    &self.day_format,
                )))
            }
            ShellCommand::Quit => Ok(Outcome::Quit),
        }
    }
}

/// Split a line with POSIX shell quoting rules. An unquoted `#` starts a
/// comment, so quote titles that contain one.
fn split_words(line: &str) -> Result<Vec<String>> {
    shlex::split(line).ok_or_else(|| anyhow::anyhow!("Unterminated quote in: {}", line))
}
