//! Point-in-time view of the library's records
//!
//! Core operations take a `&Snapshot` and hand back a new one; they never
//! hold on to state between calls.

use serde::{Deserialize, Serialize};

use crate::models::{Book, Member, Transaction};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Snapshot {
    pub fn new(books: Vec<Book>, members: Vec<Member>, transactions: Vec<Transaction>) -> Self {
        Self {
            books,
            members,
            transactions,
        }
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Outstanding loans referencing a book, in record order
    pub fn active_loans_for_book<'a>(
        &'a self,
        book_id: &'a str,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions
            .iter()
            .filter(move |t| t.book_id == book_id && t.is_active())
    }
}

/// Next free identifier of the form `<prefix><n>`, starting at `len + 1`.
pub(crate) fn next_id<'a>(prefix: &str, existing: impl Iterator<Item = &'a str> + Clone) -> String {
    let mut n = existing.clone().count() + 1;
    loop {
        let candidate = format!("{}{}", prefix, n);
        if !existing.clone().any(|id| id == candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_skips_taken_ids() {
        let ids = ["tr1", "tr2", "tr3"];
        assert_eq!(next_id("tr", ids.iter().copied()), "tr4");

        let ids = ["tr2", "tr3"];
        assert_eq!(next_id("tr", ids.iter().copied()), "tr4");

        let ids: [&str; 0] = [];
        assert_eq!(next_id("m", ids.iter().copied()), "m1");
    }
}
