//! Book Service - Catalog search without HTTP layer
//!
//! Filtering preserves catalog order; nothing here sorts.

use crate::models::{Book, BookStatus};

/// Genre value that disables the genre filter
pub const ALL_GENRES: &str = "All Genres";

/// Genre picklist offered by the catalog, sentinel first
pub const GENRES: [&str; 14] = [
    ALL_GENRES,
    "Fiction",
    "Non-Fiction",
    "Mystery",
    "Science Fiction",
    "Fantasy",
    "Biography",
    "History",
    "Self-Help",
    "Business",
    "Dystopian",
    "Classic",
    "Science",
    "Romance",
];

/// Filter parameters for searching the catalog
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookFilter {
    /// Matched against title and author (case-insensitive) and isbn (verbatim)
    pub query: Option<String>,
    pub genre: Option<String>,
    /// `"available"` or `"checked-out"`; any other value matches nothing
    pub availability: Option<String>,
}

impl BookFilter {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    /// Build a filter from catalog search arguments.
    ///
    /// An empty genre means every genre; `available_only` restricts to
    /// books on the shelf.
    pub fn from_search(search_term: &str, genre: &str, available_only: bool) -> Self {
        Self {
            query: non_empty(search_term),
            genre: non_empty(genre),
            availability: available_only.then(|| BookStatus::Available.as_str().to_string()),
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.matches_query(book) && self.matches_genre(book) && self.matches_availability(book)
    }

    fn matches_query(&self, book: &Book) -> bool {
        let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
            return true;
        };
        let needle = query.to_lowercase();
        book.title.to_lowercase().contains(&needle)
            || book.author.to_lowercase().contains(&needle)
            || book.isbn.contains(query)
    }

    fn matches_genre(&self, book: &Book) -> bool {
        match self.genre.as_deref() {
            None | Some("") | Some(ALL_GENRES) => true,
            Some(genre) => book.genre == genre,
        }
    }

    fn matches_availability(&self, book: &Book) -> bool {
        match self.availability.as_deref() {
            None | Some("") => true,
            Some(value) => match value.parse::<BookStatus>() {
                Ok(wanted @ (BookStatus::Available | BookStatus::CheckedOut)) => {
                    book.status == wanted
                }
                _ => false,
            },
        }
    }
}

/// Books matching every criterion of the filter, in input order
pub fn filter_books<'a>(books: &'a [Book], filter: &BookFilter) -> Vec<&'a Book> {
    tracing::debug!(
        "Filter books - query={:?}, genre={:?}, availability={:?}",
        filter.query,
        filter.genre,
        filter.availability
    );

    books.iter().filter(|book| filter.matches(book)).collect()
}

/// Catalog search with the arguments the desk front-end sends
pub fn search_books<'a>(
    books: &'a [Book],
    search_term: &str,
    genre: &str,
    available_only: bool,
) -> Vec<&'a Book> {
    filter_books(books, &BookFilter::from_search(search_term, genre, available_only))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
