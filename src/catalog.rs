// Catalog operations over the in-memory library.
// Everything here is pure with respect to the console: callers pass in
// already-validated values and decide how to present the outcome. The UI
// layer (`ui`) is the only place that prints.

use crate::models::Book;
use log::{debug, info};

/// Result of trying to add a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// A record with the same title and author already exists.
    Duplicate,
}

/// Result of trying to remove a book by title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(Book),
    NotFound,
}

/// Which field a search query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
}

impl SearchField {
    pub fn label(&self) -> &'static str {
        match self {
            SearchField::Title => "Title",
            SearchField::Author => "Author",
        }
    }
}

/// Summary numbers for a non-empty library.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub total: usize,
    pub read: usize,
    pub unread: usize,
    /// Genre histogram in first-occurrence order.
    pub genres: Vec<(String, usize)>,
}

impl Statistics {
    /// Share of read books, 0.0 to 100.0.
    pub fn read_percentage(&self) -> f64 {
        100.0 * self.read as f64 / self.total as f64
    }
}

/// The session's book list. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap records loaded from storage. Duplicates already present are kept
    /// as-is; the key is only checked on `add`.
    pub fn from_books(books: Vec<Book>) -> Self {
        Library { books }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Every record in insertion order.
    pub fn list_all(&self) -> &[Book] {
        &self.books
    }

    /// Append `book` unless a record with the same title and author
    /// (case-insensitive) is already present.
    pub fn add(&mut self, book: Book) -> AddOutcome {
        if self
            .books
            .iter()
            .any(|existing| existing.same_key(&book.title, &book.author))
        {
            debug!("duplicate book rejected: {} / {}", book.title, book.author);
            return AddOutcome::Duplicate;
        }

        info!("adding book: {} by {}", book.title, book.author);
        self.books.push(book);
        AddOutcome::Added
    }

    /// Remove the first record whose title matches, ignoring case. Later
    /// records with the same title (different author) are left alone.
    pub fn remove(&mut self, title: &str) -> RemoveOutcome {
        let wanted = title.trim().to_lowercase();
        match self
            .books
            .iter()
            .position(|book| book.title.to_lowercase() == wanted)
        {
            Some(index) => {
                let removed = self.books.remove(index);
                info!("removed book: {} by {}", removed.title, removed.author);
                RemoveOutcome::Removed(removed)
            }
            None => RemoveOutcome::NotFound,
        }
    }

    /// Case-insensitive substring search on the chosen field. An empty query
    /// matches every record.
    pub fn search(&self, field: SearchField, query: &str) -> Vec<&Book> {
        let needle = query.trim().to_lowercase();
        debug!("search by {:?} for {:?}", field, needle);

        self.books
            .iter()
            .filter(|book| {
                let haystack = match field {
                    SearchField::Title => &book.title,
                    SearchField::Author => &book.author,
                };
                haystack.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Counts and genre histogram, or `None` when the library is empty.
    pub fn statistics(&self) -> Option<Statistics> {
        if self.books.is_empty() {
            return None;
        }

        let total = self.books.len();
        let read = self.books.iter().filter(|book| book.read).count();

        let mut genres: Vec<(String, usize)> = Vec::new();
        for book in &self.books {
            match genres.iter_mut().find(|(genre, _)| *genre == book.genre) {
                Some((_, count)) => *count += 1,
                None => genres.push((book.genre.clone(), 1)),
            }
        }

        Some(Statistics {
            total,
            read,
            unread: total - read,
            genres,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dune() -> Book {
        Book::new("Dune", "Herbert", 1965, "sci-fi", true)
    }

    fn sample() -> Library {
        let mut library = Library::new();
        library.add(dune());
        library.add(Book::new("Emma", "Jane Austen", 1815, "romance", false));
        library.add(Book::new("Persuasion", "Jane Austen", 1817, "romance", true));
        library.add(Book::new("Neuromancer", "William Gibson", 1984, "Sci-Fi", false));
        library
    }

    #[test]
    fn test_add_appends_in_order() {
        let library = sample();
        let titles: Vec<&str> = library.list_all().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Emma", "Persuasion", "Neuromancer"]);
    }

    #[test]
    fn test_add_rejects_duplicate_ignoring_case() {
        let mut library = sample();
        let outcome = library.add(Book::new("DUNE", "herbert", 2000, "classic", false));
        assert_eq!(outcome, AddOutcome::Duplicate);
        assert_eq!(library.len(), 4);
        assert_eq!(library.list_all()[0], dune());
    }

    #[test]
    fn test_add_same_title_different_author() {
        let mut library = sample();
        let outcome = library.add(Book::new("Dune", "Brian Herbert", 2000, "sci-fi", false));
        assert_eq!(outcome, AddOutcome::Added);
        assert_eq!(library.len(), 5);
    }

    #[test]
    fn test_remove_present_title() {
        let mut library = sample();
        let outcome = library.remove("emma");
        assert!(matches!(outcome, RemoveOutcome::Removed(ref b) if b.title == "Emma"));
        assert_eq!(library.len(), 3);
        assert!(library.list_all().iter().all(|b| b.title != "Emma"));
    }

    #[test]
    fn test_remove_only_first_match() {
        let mut library = sample();
        library.add(Book::new("Dune", "Brian Herbert", 2000, "sci-fi", false));

        library.remove("Dune");
        let remaining: Vec<&Book> = library.list_all().iter().filter(|b| b.title == "Dune").collect();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].author, "Brian Herbert");
    }

    #[test]
    fn test_remove_missing_title() {
        let mut library = sample();
        let before = library.clone();
        assert_eq!(library.remove("Ulysses"), RemoveOutcome::NotFound);
        assert_eq!(library, before);
    }

    #[test]
    fn test_search_narrows_by_field() {
        let library = sample();

        let by_author = library.search(SearchField::Author, "austen");
        assert_eq!(by_author.len(), 2);
        assert_eq!(by_author[0].title, "Emma");
        assert_eq!(by_author[1].title, "Persuasion");

        // "her" is in "Herbert" but in no title
        assert!(library.search(SearchField::Title, "her").is_empty());
        assert_eq!(library.search(SearchField::Author, "her").len(), 1);
    }

    #[test]
    fn test_search_no_results() {
        let library = sample();
        assert!(library.search(SearchField::Title, "ulysses").is_empty());
    }

    #[test]
    fn test_search_empty_query_matches_all() {
        let library = sample();
        assert_eq!(library.search(SearchField::Title, "  ").len(), 4);
    }

    #[test]
    fn test_statistics_empty() {
        assert_eq!(Library::new().statistics(), None);
    }

    #[test]
    fn test_statistics_counts_and_genres() {
        let stats = sample().statistics().unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.read, 2);
        assert_eq!(stats.unread, 2);
        assert_eq!(format!("{:.2}", stats.read_percentage()), "50.00");
        assert_eq!(
            stats.genres,
            vec![("Sci-fi".to_string(), 2), ("Romance".to_string(), 2)]
        );
    }

    #[test]
    fn test_dune_scenario() {
        let mut library = Library::new();
        assert_eq!(library.add(dune()), AddOutcome::Added);
        assert_eq!(library.list_all()[0].genre, "Sci-fi");

        let found = library.search(SearchField::Title, "dune");
        assert_eq!(found, vec![&dune()]);

        let stats = library.statistics().unwrap();
        assert_eq!((stats.total, stats.read, stats.unread), (1, 1, 0));
        assert_eq!(format!("{:.2}", stats.read_percentage()), "100.00");
        assert_eq!(stats.genres, vec![("Sci-fi".to_string(), 1)]);
    }

    proptest! {
        #[test]
        fn prop_add_then_search_title(
            title in "[A-Za-z][A-Za-z ]{0,20}",
            author in "[A-Za-z][A-Za-z ]{0,20}",
            year in 1u16..=9999,
            genre in "[a-z]{1,10}",
            read in any::<bool>(),
        ) {
            let mut library = Library::new();
            let book = Book::new(&title, &author, year, &genre, read);
            library.add(book.clone());

            let query = book.title.to_lowercase();
            let found = library.search(SearchField::Title, &query);
            prop_assert_eq!(found.len(), 1);
            prop_assert_eq!(found[0], &book);
            prop_assert!(found[0].genre.chars().next().unwrap().is_uppercase());
        }

        #[test]
        fn prop_duplicate_add_keeps_length(title in "[a-z]{1,12}", author in "[a-z]{1,12}") {
            let mut library = Library::new();
            library.add(Book::new(&title, &author, 2000, "drama", false));
            let outcome = library.add(Book::new(&title.to_uppercase(), &author.to_uppercase(), 1999, "other", true));
            prop_assert_eq!(outcome, AddOutcome::Duplicate);
            prop_assert_eq!(library.len(), 1);
        }

        #[test]
        fn prop_statistics_counts(flags in proptest::collection::vec(any::<bool>(), 1..40)) {
            let mut library = Library::new();
            for (i, read) in flags.iter().enumerate() {
                library.add(Book::new(&format!("Book {i}"), "Anon", 2000, "misc", *read));
            }
            let stats = library.statistics().unwrap();
            let read = flags.iter().filter(|r| **r).count();
            prop_assert_eq!(stats.total, flags.len());
            prop_assert_eq!(stats.read, read);
            prop_assert_eq!(stats.unread, flags.len() - read);
            let expected = 100.0 * read as f64 / flags.len() as f64;
            prop_assert_eq!(format!("{:.2}", stats.read_percentage()), format!("{:.2}", expected));
        }
    }
}
