// Domain model: a single book record as stored in the library file.
// The serde field names are the on-disk JSON keys, so renaming a field
// here changes the file format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A book entry. There is no id; the (title, author) pair compared
/// case-insensitively acts as the key for duplicate detection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub author: String,
    /// Publication year, always within 1..=9999 when entered interactively.
    pub year: u16,
    /// Genre in capitalized form ("Sci-fi", not "sci-fi").
    pub genre: String,
    pub read: bool,
}

impl Book {
    /// Build a record from raw user input. Title and author are trimmed and
    /// otherwise kept verbatim; the genre is trimmed and capitalized.
    pub fn new(title: &str, author: &str, year: u16, genre: &str, read: bool) -> Self {
        Book {
            title: title.trim().to_string(),
            author: author.trim().to_string(),
            year,
            genre: capitalize(genre.trim()),
            read,
        }
    }

    /// Whether this record has the same title and author as the given pair,
    /// ignoring case.
    pub fn same_key(&self, title: &str, author: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
            && self.author.to_lowercase() == author.to_lowercase()
    }

    pub fn status(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "Unread"
        }
    }
}

impl fmt::Display for Book {
    /// One-line listing form used by the search and display screens.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {} - {}",
            self.title,
            self.author,
            self.year,
            self.genre,
            self.status()
        )
    }
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
