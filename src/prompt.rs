// Input validation. The `parse_*` functions hold the rules and never touch
// the console; the `read_*` functions keep asking the console until the
// rules are satisfied.

use crate::console::{Console, Tone};
use anyhow::Result;
use std::num::IntErrorKind;
use thiserror::Error;

/// Why a year entry was rejected. The message is what the user sees
/// before being asked again.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum YearError {
    #[error("Invalid input. Please enter a numeric year.")]
    NotNumeric,
    #[error("Please enter a valid year (1–9999).")]
    OutOfRange,
}

/// Parse a publication year in 1..=9999.
pub fn parse_year(input: &str) -> Result<u16, YearError> {
    let year = match input.trim().parse::<i64>() {
        Ok(year) => year,
        // a very long run of digits is still a number, just not a year
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return Err(YearError::OutOfRange)
        }
        Err(_) => return Err(YearError::NotNumeric),
    };

    if (1..=9999).contains(&year) {
        Ok(year as u16)
    } else {
        Err(YearError::OutOfRange)
    }
}

/// `Some(true)` for "yes", `Some(false)` for "no", ignoring case and
/// surrounding whitespace. Anything else is `None`.
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// Ask until the user types a valid year.
pub fn read_year(console: &mut impl Console, prompt: &str) -> Result<u16> {
    loop {
        let raw = console.read_line(prompt, true)?;
        match parse_year(&raw) {
            Ok(year) => return Ok(year),
            Err(e) => console.say(Tone::Plain, &e.to_string())?,
        }
    }
}

/// Ask until the user answers "yes" or "no".
pub fn read_yes_no(console: &mut impl Console, prompt: &str) -> Result<bool> {
    loop {
        let raw = console.read_line(prompt, true)?;
        match parse_yes_no(&raw) {
            Some(answer) => return Ok(answer),
            None => console.say(Tone::Plain, "Please enter 'yes' or 'no'.")?,
        }
    }
}
