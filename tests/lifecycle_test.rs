use chrono::{DateTime, Duration, TimeZone, Utc};
use circulation_desk::domain::{DomainError, Entity, Snapshot};
use circulation_desk::models::{BookStatus, Transaction, TransactionStatus};
use circulation_desk::seed::sample_snapshot;
use circulation_desk::services::loan_service::{
    self, active_loan_for, checkout, return_book, return_by_book, DEFAULT_LOAN_DAYS, MAX_LOAN_DAYS,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 3, 20, 12, 0, 0).unwrap()
}

fn active_loans<'a>(snapshot: &'a Snapshot, book_id: &str) -> Vec<&'a Transaction> {
    snapshot
        .transactions
        .iter()
        .filter(|t| t.book_id == book_id && t.is_active())
        .collect()
}

#[test]
fn test_checkout_marks_book_and_opens_one_loan() {
    let before = sample_snapshot();

    let outcome = checkout(&before, "b1", "m2", DEFAULT_LOAN_DAYS, now()).expect("checkout");
    let after = &outcome.snapshot;

    assert_eq!(after.book("b1").unwrap().status, BookStatus::CheckedOut);
    let loans = active_loans(after, "b1");
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].member_id, "m2");
    assert_eq!(after.transactions.len(), before.transactions.len() + 1);

    let tx = &outcome.transaction;
    assert_eq!(tx.id, "tr4");
    assert_eq!(tx.status, TransactionStatus::Active);
    assert_eq!(tx.checkout_date, now());
    assert_eq!(tx.due_date, now() + Duration::days(14));
    assert_eq!(tx.return_date, None);

    // input snapshot untouched
    assert_eq!(before, sample_snapshot());
}

#[test]
fn test_every_available_book_can_be_checked_out() {
    let snapshot = sample_snapshot();

    for book in snapshot.books.iter().filter(|b| b.is_available()) {
        let outcome = checkout(&snapshot, &book.id, "m1", DEFAULT_LOAN_DAYS, now())
            .unwrap_or_else(|e| panic!("{}: {}", book.id, e));
        assert_eq!(
            outcome.snapshot.book(&book.id).unwrap().status,
            BookStatus::CheckedOut
        );
        assert_eq!(active_loans(&outcome.snapshot, &book.id).len(), 1);
    }
}

#[test]
fn test_checkout_of_lent_book_fails_without_changes() {
    let snapshot = sample_snapshot();

    for _ in 0..2 {
        let err = checkout(&snapshot, "b3", "m2", DEFAULT_LOAN_DAYS, now()).unwrap_err();
        assert!(matches!(err, DomainError::NotAvailable { ref book_id, .. } if book_id == "b3"));
    }
    assert_eq!(snapshot, sample_snapshot());
}

#[test]
fn test_checkout_rejects_inactive_member() {
    let err = checkout(&sample_snapshot(), "b1", "m4", DEFAULT_LOAN_DAYS, now()).unwrap_err();
    assert_eq!(
        err,
        DomainError::MemberInactive {
            member_id: "m4".to_string(),
            status: "inactive".to_string(),
        }
    );
}

#[test]
fn test_checkout_unknown_records() {
    let snapshot = sample_snapshot();

    let err = checkout(&snapshot, "b99", "m1", DEFAULT_LOAN_DAYS, now()).unwrap_err();
    assert_eq!(err, DomainError::not_found(Entity::Book, "b99"));

    let err = checkout(&snapshot, "b1", "m99", DEFAULT_LOAN_DAYS, now()).unwrap_err();
    assert_eq!(err, DomainError::not_found(Entity::Member, "m99"));
}

#[test]
fn test_checkout_refuses_book_with_stray_open_loan() {
    let mut snapshot = sample_snapshot();
    // b3 claims to be on the shelf while tr1 is still open
    snapshot
        .books
        .iter_mut()
        .find(|b| b.id == "b3")
        .unwrap()
        .status = BookStatus::Available;

    let err = checkout(&snapshot, "b3", "m2", DEFAULT_LOAN_DAYS, now()).unwrap_err();
    assert!(matches!(err, DomainError::NotAvailable { .. }));
}

#[test]
fn test_return_then_checkout_to_another_member() {
    let snapshot = sample_snapshot();

    let returned = return_book(&snapshot, "tr1", now()).expect("return");
    assert_eq!(returned.transaction.status, TransactionStatus::Completed);
    assert_eq!(returned.transaction.return_date, Some(now()));
    assert_eq!(
        returned.snapshot.book("b3").unwrap().status,
        BookStatus::Available
    );

    let lent = checkout(&returned.snapshot, "b3", "m2", DEFAULT_LOAN_DAYS, now()).expect("checkout");
    let loans = active_loans(&lent.snapshot, "b3");
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].member_id, "m2");
}

#[test]
fn test_second_return_is_already_completed() {
    let first = return_book(&sample_snapshot(), "tr2", now()).unwrap();

    let err = return_book(&first.snapshot, "tr2", now()).unwrap_err();
    assert_eq!(
        err,
        DomainError::AlreadyCompleted {
            transaction_id: "tr2".to_string()
        }
    );
}

#[test]
fn test_return_unknown_transaction() {
    let err = return_book(&sample_snapshot(), "tr42", now()).unwrap_err();
    assert_eq!(err, DomainError::not_found(Entity::Transaction, "tr42"));
}

#[test]
fn test_return_by_book_finds_the_open_loan() {
    let outcome = return_by_book(&sample_snapshot(), "b7", now()).unwrap();
    assert_eq!(outcome.transaction.id, "tr2");
    assert_eq!(
        outcome.snapshot.book("b7").unwrap().status,
        BookStatus::Available
    );

    let err = return_by_book(&outcome.snapshot, "b7", now()).unwrap_err();
    assert_eq!(err, DomainError::not_found(Entity::ActiveLoan, "b7"));
}

#[test]
fn test_return_by_book_detects_duplicate_open_loans() {
    let mut snapshot = sample_snapshot();
    let mut duplicate = snapshot.transaction("tr1").unwrap().clone();
    duplicate.id = "tr9".to_string();
    duplicate.member_id = "m2".to_string();
    snapshot.transactions.push(duplicate);

    let err = return_by_book(&snapshot, "b3", now()).unwrap_err();
    assert_eq!(
        err,
        DomainError::AmbiguousState {
            book_id: "b3".to_string(),
            active_loans: 2,
        }
    );

    assert!(active_loan_for(&snapshot.transactions, "b3").is_err());
    assert_eq!(
        active_loan_for(&snapshot.transactions, "b1").unwrap(),
        None
    );
}

#[test]
fn test_custom_loan_period() {
    let outcome = loan_service::checkout(&sample_snapshot(), "b6", "m3", 7, now()).unwrap();
    assert_eq!(outcome.transaction.due_date, now() + Duration::days(7));
}

#[test]
fn test_loan_period_upper_bound() {
    let snapshot = sample_snapshot();

    let longest = checkout(&snapshot, "b1", "m2", MAX_LOAN_DAYS, now()).unwrap();
    assert_eq!(longest.transaction.due_date, now() + Duration::days(MAX_LOAN_DAYS));

    for days in [MAX_LOAN_DAYS + 1, 100_000_000, i64::MAX / 2, i64::MAX] {
        let err = checkout(&snapshot, "b1", "m2", days, now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)), "{} days", days);
    }
    assert_eq!(snapshot, sample_snapshot());
}
