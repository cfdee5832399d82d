//! Dashboard Service - Circulation statistics for the admin view
//!
//! All figures are computed from the snapshot at the given instant; nothing
//! is cached between calls.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::domain::Snapshot;
use crate::models::{Book, BookStatus, LoanState, Member, Transaction};

/// Days ahead of the due date a loan counts as "due soon"
pub const DEFAULT_DUE_SOON_DAYS: i64 = 7;

/// Genres shown in the histogram
pub const TOP_GENRES: usize = 5;

/// Entries shown in the recent activity feed
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: BookStatus,
    pub count: usize,
}

/// Loan joined with the book and member it references
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    pub transaction: Transaction,
    pub book: Book,
    pub member: Member,
    pub state: LoanState,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverdueLoan {
    #[serde(flatten)]
    pub details: LoanDetails,
    pub days_overdue: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_books: usize,
    pub available_books: usize,
    pub checked_out_books: usize,
    pub active_members: usize,
    pub due_soon: Vec<Transaction>,
    pub overdue: Vec<Transaction>,
    pub genre_histogram: Vec<GenreCount>,
    pub recent_activity: Vec<LoanDetails>,
}

/// Build the full dashboard for `now`
pub fn summarize(snapshot: &Snapshot, now: DateTime<Utc>, due_soon_days: i64) -> DashboardSummary {
    let count_status = |status: BookStatus| snapshot.books.iter().filter(|b| b.status == status).count();

    let overdue = overdue(&snapshot.transactions, now);
    let due_soon = due_soon(&snapshot.transactions, now, due_soon_days);

    let recent_activity = overdue
        .iter()
        .chain(due_soon.iter())
        .take(RECENT_ACTIVITY_LIMIT)
        .filter_map(|t| join_loan(snapshot, t, now))
        .collect();

    DashboardSummary {
        total_books: snapshot.books.len(),
        available_books: count_status(BookStatus::Available),
        checked_out_books: count_status(BookStatus::CheckedOut),
        active_members: snapshot.members.iter().filter(|m| m.is_active()).count(),
        due_soon: due_soon.into_iter().cloned().collect(),
        overdue: overdue.into_iter().cloned().collect(),
        genre_histogram: genre_histogram(&snapshot.books, TOP_GENRES),
        recent_activity,
    }
}

/// Active loans whose whole days until due (truncated toward zero) fall
/// within `0..=window_days`, earliest first.
///
/// A loan less than a day past due truncates to zero days, so it shows up
/// here as well as in `overdue`.
pub fn due_soon(transactions: &[Transaction], now: DateTime<Utc>, window_days: i64) -> Vec<&Transaction> {
    let mut loans: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.is_active())
        .filter(|t| (0..=window_days).contains(&(t.due_date - now).num_days()))
        .collect();
    loans.sort_by_key(|t| t.due_date);
    loans
}

/// Active loans past their due date, most overdue first
pub fn overdue(transactions: &[Transaction], now: DateTime<Utc>) -> Vec<&Transaction> {
    let mut loans: Vec<&Transaction> = transactions.iter().filter(|t| t.is_overdue(now)).collect();
    loans.sort_by_key(|t| t.due_date);
    loans
}

/// Book counts per genre, largest first, at most `limit` entries.
/// Equal counts keep the order in which genres first appear.
pub fn genre_histogram(books: &[Book], limit: usize) -> Vec<GenreCount> {
    let mut counts: Vec<GenreCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for book in books {
        match index.get(book.genre.as_str()) {
            Some(&i) => {
                if let Some(entry) = counts.get_mut(i) {
                    entry.count += 1;
                }
            }
            None => {
                index.insert(&book.genre, counts.len());
                counts.push(GenreCount {
                    genre: book.genre.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, ties stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Book counts per status, in status order, skipping empty statuses
pub fn books_by_status(books: &[Book]) -> Vec<StatusCount> {
    BookStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: books.iter().filter(|b| b.status == status).count(),
        })
        .filter(|c| c.count > 0)
        .collect()
}

/// Latest checkouts first, joined with their book and member
pub fn recent_transactions(snapshot: &Snapshot, now: DateTime<Utc>, limit: usize) -> Vec<LoanDetails> {
    let mut transactions: Vec<&Transaction> = snapshot.transactions.iter().collect();
    transactions.sort_by(|a, b| b.checkout_date.cmp(&a.checkout_date));

    transactions
        .into_iter()
        .filter_map(|t| join_loan(snapshot, t, now))
        .take(limit)
        .collect()
}

/// Overdue loans with book, member and whole days past due
pub fn overdue_loans(snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<OverdueLoan> {
    overdue(&snapshot.transactions, now)
        .into_iter()
        .filter_map(|t| join_loan(snapshot, t, now))
        .map(|details| OverdueLoan {
            days_overdue: (now - details.transaction.due_date).num_days(),
            details,
        })
        .collect()
}

/// `None` when the book or member is missing from the snapshot
fn join_loan(snapshot: &Snapshot, transaction: &Transaction, now: DateTime<Utc>) -> Option<LoanDetails> {
    let book = snapshot.book(&transaction.book_id)?;
    let member = snapshot.member(&transaction.member_id)?;

    Some(LoanDetails {
        transaction: transaction.clone(),
        book: book.clone(),
        member: member.clone(),
        state: transaction.state_at(now),
    })
}
