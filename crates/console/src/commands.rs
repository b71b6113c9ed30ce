//! # Command Interpreter
//!
//! Turns one line of console input into a [`Command`]. This is pure syntax:
//! a line that does not match, or names a date or time that does not exist,
//! yields `None` and is ignored by the caller.
//!
//! | Input | Command |
//! |---|---|
//! | `add DD/MM HH:MM` | [`Command::Create`] |
//! | `delete DD/MM HH:MM` | [`Command::Delete`] |
//! | `find DD/MM` | [`Command::Find`] |
//! | `keep HH:MM` | [`Command::Keep`] |
//! | anything containing `quit` | [`Command::Quit`] |
//!
//! Keywords are case-insensitive. Dates carry no year; the caller supplies it.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static QUIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)quit").expect("QUIT_REGEX should compile - this is a bug"));

static ADD_OR_DELETE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<verb>add|delete) (?P<day>\d{2})/(?P<month>\d{2}) (?P<hours>\d{2}):(?P<minutes>\d{2})$")
        .expect("ADD_OR_DELETE_REGEX should compile - this is a bug")
});

static FIND_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^find (?P<day>\d{2})/(?P<month>\d{2})$")
        .expect("FIND_REGEX should compile - this is a bug")
});

static KEEP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^keep (?P<hours>\d{2}):(?P<minutes>\d{2})$")
        .expect("KEEP_REGEX should compile - this is a bug")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Create(NaiveDateTime),
    Delete(NaiveDateTime),
    Find(NaiveDate),
    Keep(NaiveTime),
    Quit,
}

/// Parses `line`, placing dates in `year`.
pub fn parse_command(line: &str, year: i32) -> Option<Command> {
    let line = line.trim();

    if QUIT_REGEX.is_match(line) {
        return Some(Command::Quit);
    }

    if let Some(caps) = ADD_OR_DELETE_REGEX.captures(line) {
        let start = parse_date(&caps, year)?.and_time(parse_time(&caps)?);
        return if caps["verb"].eq_ignore_ascii_case("add") {
            Some(Command::Create(start))
        } else {
            Some(Command::Delete(start))
        };
    }

    if let Some(caps) = FIND_REGEX.captures(line) {
        return parse_date(&caps, year).map(Command::Find);
    }

    if let Some(caps) = KEEP_REGEX.captures(line) {
        return parse_time(&caps).map(Command::Keep);
    }

    None
}

fn number(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name)?.as_str().parse().ok()
}

fn parse_date(caps: &Captures<'_>, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, number(caps, "month")?, number(caps, "day")?)
}

fn parse_time(caps: &Captures<'_>) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(number(caps, "hours")?, number(caps, "minutes")?, 0)
}
