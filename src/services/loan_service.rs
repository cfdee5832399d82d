//! Loan Service - Checkout/return lifecycle over snapshots
//!
//! Every function here is pure: it reads the snapshot it is given and either
//! returns a new snapshot or a `DomainError`. The clock is always a
//! parameter.

use chrono::{DateTime, Duration, Utc};

use crate::domain::snapshot::next_id;
use crate::domain::{DomainError, Entity, Snapshot};
use crate::models::{Book, BookStatus, Transaction, TransactionStatus};

/// Default loan period in days
pub const DEFAULT_LOAN_DAYS: i64 = 14;

/// Longest loan period accepted, about ten years
pub const MAX_LOAN_DAYS: i64 = 3650;

/// Result of a successful lifecycle operation
#[derive(Debug, Clone)]
pub struct LoanOutcome {
    /// Snapshot after the operation
    pub snapshot: Snapshot,
    /// The transaction that was created or completed
    pub transaction: Transaction,
}

/// Lend a book to a member.
///
/// The book must exist and be available with no outstanding loan against
/// it, and the member must exist and be active.
pub fn checkout(
    snapshot: &Snapshot,
    book_id: &str,
    member_id: &str,
    loan_days: i64,
    now: DateTime<Utc>,
) -> Result<LoanOutcome, DomainError> {
    if !(1..=MAX_LOAN_DAYS).contains(&loan_days) {
        return Err(DomainError::Validation(format!(
            "loan period must be between 1 and {} days, got {}",
            MAX_LOAN_DAYS, loan_days
        )));
    }
    let due_date = Duration::try_days(loan_days)
        .and_then(|period| now.checked_add_signed(period))
        .ok_or_else(|| {
            DomainError::Validation(format!(
                "a {} day loan from {} has no representable due date",
                loan_days, now
            ))
        })?;

    let book = snapshot
        .book(book_id)
        .ok_or_else(|| DomainError::not_found(Entity::Book, book_id))?;
    let member = snapshot
        .member(member_id)
        .ok_or_else(|| DomainError::not_found(Entity::Member, member_id))?;

    if !book.is_available() {
        return Err(DomainError::NotAvailable {
            book_id: book.id.clone(),
            status: book.status.to_string(),
        });
    }

    // Book says available but a loan is still open: treat as lent out
    if snapshot.active_loans_for_book(book_id).next().is_some() {
        tracing::warn!(
            "Book {} is marked available but has an open loan, refusing checkout",
            book_id
        );
        return Err(DomainError::NotAvailable {
            book_id: book.id.clone(),
            status: BookStatus::CheckedOut.to_string(),
        });
    }

    if !member.is_active() {
        return Err(DomainError::MemberInactive {
            member_id: member.id.clone(),
            status: member.status.as_str().to_string(),
        });
    }

    let transaction = Transaction {
        id: next_id("tr", snapshot.transactions.iter().map(|t| t.id.as_str())),
        book_id: book.id.clone(),
        member_id: member.id.clone(),
        checkout_date: now,
        due_date,
        return_date: None,
        status: TransactionStatus::Active,
    };

    let mut next = snapshot.clone();
    set_book_status(&mut next.books, book_id, BookStatus::CheckedOut);
    next.transactions.push(transaction.clone());

    tracing::info!(
        "Checked out book {} to member {} as {} (due {})",
        book_id,
        member_id,
        transaction.id,
        transaction.due_date.format("%Y-%m-%d")
    );

    Ok(LoanOutcome {
        snapshot: next,
        transaction,
    })
}

/// Close an outstanding loan and put the book back on the shelf
pub fn return_book(
    snapshot: &Snapshot,
    transaction_id: &str,
    now: DateTime<Utc>,
) -> Result<LoanOutcome, DomainError> {
    let transaction = snapshot
        .transaction(transaction_id)
        .ok_or_else(|| DomainError::not_found(Entity::Transaction, transaction_id))?;

    if transaction.status == TransactionStatus::Completed {
        return Err(DomainError::AlreadyCompleted {
            transaction_id: transaction.id.clone(),
        });
    }

    if snapshot.book(&transaction.book_id).is_none() {
        return Err(DomainError::not_found(Entity::Book, &transaction.book_id));
    }

    let mut completed = transaction.clone();
    completed.status = TransactionStatus::Completed;
    completed.return_date = Some(now.max(completed.checkout_date));

    let mut next = snapshot.clone();
    if let Some(slot) = next.transactions.iter_mut().find(|t| t.id == transaction_id) {
        *slot = completed.clone();
    }
    set_book_status(&mut next.books, &completed.book_id, BookStatus::Available);

    tracing::info!(
        "Returned book {} from member {} ({})",
        completed.book_id,
        completed.member_id,
        completed.id
    );

    Ok(LoanOutcome {
        snapshot: next,
        transaction: completed,
    })
}

/// Return whatever loan is outstanding for a book
pub fn return_by_book(
    snapshot: &Snapshot,
    book_id: &str,
    now: DateTime<Utc>,
) -> Result<LoanOutcome, DomainError> {
    if snapshot.book(book_id).is_none() {
        return Err(DomainError::not_found(Entity::Book, book_id));
    }

    let transaction_id = active_loan_for(&snapshot.transactions, book_id)?
        .map(|t| t.id.clone())
        .ok_or_else(|| DomainError::not_found(Entity::ActiveLoan, book_id))?;

    return_book(snapshot, &transaction_id, now)
}

/// The single outstanding loan for a book, if any.
///
/// Fails with `AmbiguousState` when the records hold more than one.
pub fn active_loan_for<'a>(
    transactions: &'a [Transaction],
    book_id: &str,
) -> Result<Option<&'a Transaction>, DomainError> {
    let mut active = transactions
        .iter()
        .filter(|t| t.book_id == book_id && t.is_active());

    let first = active.next();
    let extra = active.count();
    if extra > 0 {
        tracing::error!(
            "Book {} has {} open loans, records are inconsistent",
            book_id,
            extra + 1
        );
        return Err(DomainError::AmbiguousState {
            book_id: book_id.to_string(),
            active_loans: extra + 1,
        });
    }

    Ok(first)
}

fn set_book_status(books: &mut [Book], book_id: &str, status: BookStatus) {
    if let Some(book) = books.iter_mut().find(|b| b.id == book_id) {
        book.status = status;
    }
}
