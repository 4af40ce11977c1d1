// UI layer: a numbered text menu read through a `Console`.
// Handlers collect input, call into `catalog`, and report the outcome.
// The formatting helpers return strings so they can be tested without a
// terminal.

use crate::catalog::{AddOutcome, Library, RemoveOutcome, SearchField, Statistics};
use crate::console::{Console, Tone};
use crate::models::Book;
use crate::prompt::{read_year, read_yes_no};
use crate::storage::LibraryStore;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::time::Duration;

const RULE_WIDTH: usize = 40;

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    Search,
    Display,
    Statistics,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::Add,
        MenuChoice::Remove,
        MenuChoice::Search,
        MenuChoice::Display,
        MenuChoice::Statistics,
        MenuChoice::Exit,
    ];

    /// Map the typed menu number ("1" to "6") to a choice.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::Remove),
            "3" => Some(MenuChoice::Search),
            "4" => Some(MenuChoice::Display),
            "5" => Some(MenuChoice::Statistics),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Add => "Add a book",
            MenuChoice::Remove => "Remove a book",
            MenuChoice::Search => "Search for a book",
            MenuChoice::Display => "Display all books",
            MenuChoice::Statistics => "Display statistics",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Main interactive menu. Owns the session's library and the store it
/// came from, and loops until the user picks "Exit". The library is only
/// written back on that path; if the console fails first (closed input),
/// the error is returned and nothing is saved.
pub fn main_menu(console: &mut impl Console, store: &LibraryStore, mut library: Library) -> Result<()> {
    loop {
        console.say(Tone::Plain, &render_menu())?;
        let raw = console.read_line("Enter your choice", true)?;

        let Some(choice) = MenuChoice::parse(&raw) else {
            console.say(Tone::Failure, "❌ Invalid choice. Please try again.")?;
            continue;
        };
        debug!("menu choice: {:?}", choice);

        match choice {
            MenuChoice::Add => handle_add(console, &mut library)?,
            MenuChoice::Remove => handle_remove(console, &mut library)?,
            MenuChoice::Search => handle_search(console, &library)?,
            MenuChoice::Display => console.say(Tone::Plain, &format_library(&library))?,
            MenuChoice::Statistics => match library.statistics() {
                Some(stats) => console.say(Tone::Plain, &format_statistics(&stats))?,
                None => console.say(Tone::Plain, "No books in the library.")?,
            },
            MenuChoice::Exit => {
                save_with_spinner(store, &library)?;
                console.say(Tone::Success, "💾 Library saved. Goodbye!")?;
                break;
            }
        }
    }
    Ok(())
}

/// Collect the fields of a new book and try to add it.
fn handle_add(console: &mut impl Console, library: &mut Library) -> Result<()> {
    let title = console.read_line("Enter the book title", false)?;
    let author = console.read_line("Enter the author", false)?;
    let year = read_year(console, "Enter the publication year")?;
    let genre = console.read_line("Enter the genre", true)?;
    let read = read_yes_no(console, "Have you read this book? (yes/no)")?;

    match library.add(Book::new(&title, &author, year, &genre, read)) {
        AddOutcome::Added => console.say(Tone::Success, "✅ Book added successfully!"),
        AddOutcome::Duplicate => console.say(Tone::Warning, "This book already exists in your library."),
    }
}

fn handle_remove(console: &mut impl Console, library: &mut Library) -> Result<()> {
    let title = console.read_line("Enter the title of the book to remove", true)?;
    match library.remove(&title) {
        RemoveOutcome::Removed(_) => console.say(Tone::Success, "✅ Book removed successfully!"),
        RemoveOutcome::NotFound => console.say(Tone::Failure, "❌ Book not found."),
    }
}

/// Ask for the field (a keyboard-driven `Select` on a terminal), then for
/// the query.
fn handle_search(console: &mut impl Console, library: &Library) -> Result<()> {
    let fields = [SearchField::Title, SearchField::Author];
    let labels: Vec<&str> = fields.iter().map(SearchField::label).collect();
    let selection = console.select("Search by", &labels)?;

    let query = console.read_line("Enter search query", true)?;
    let results = library.search(fields[selection], &query);
    console.say(Tone::Plain, &format_search_results(&results))
}

/// Write the library while a spinner runs. Failure here is reported to the
/// caller; the session's changes are not silently dropped.
fn save_with_spinner(store: &LibraryStore, library: &Library) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Saving library...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = store
        .save(library.list_all())
        .with_context(|| format!("could not save library to {}", store.path().display()));
    spinner.finish_and_clear();
    result
}

pub fn render_menu() -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "📖 Welcome to Personal Library Manager 📖".to_string(),
    ];
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, choice.label()));
    }
    lines.push(rule);
    lines.join("\n")
}

fn numbered(books: &[&Book]) -> Vec<String> {
    books
        .iter()
        .enumerate()
        .map(|(i, book)| format!("{}. {}", i + 1, book))
        .collect()
}

pub fn format_library(library: &Library) -> String {
    if library.is_empty() {
        return "📂 Your library is empty.".to_string();
    }
    let books: Vec<&Book> = library.list_all().iter().collect();
    let mut lines = vec!["\n📚 Your Library:".to_string()];
    lines.extend(numbered(&books));
    lines.join("\n")
}

pub fn format_search_results(results: &[&Book]) -> String {
    if results.is_empty() {
        return "No matching books found.".to_string();
    }
    let mut lines = vec!["\n📚 Matching Books:".to_string()];
    lines.extend(numbered(results));
    lines.join("\n")
}

pub fn format_statistics(stats: &Statistics) -> String {
    let mut lines = vec![
        "\n📊 Library Statistics:".to_string(),
        format!("Total books     : {}", stats.total),
        format!("Books read      : {}", stats.read),
        format!("Books unread    : {}", stats.unread),
        format!("Read percentage : {:.2}%", stats.read_percentage()),
        "\n📘 Genre Distribution:".to_string(),
    ];
    for (genre, count) in &stats.genres {
        lines.push(format!("- {}: {} book(s)", genre, count));
    }
    lines.join("\n")
}
