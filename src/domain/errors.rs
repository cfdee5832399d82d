//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! A failed operation never mutates the snapshot it was given.

use std::fmt;

/// Kind of record a lookup failed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Book,
    Member,
    Transaction,
    /// No outstanding loan exists for the given book
    ActiveLoan,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Book => write!(f, "Book"),
            Entity::Member => write!(f, "Member"),
            Entity::Transaction => write!(f, "Transaction"),
            Entity::ActiveLoan => write!(f, "Active loan"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Referenced record does not exist
    NotFound { entity: Entity, id: String },
    /// Book cannot be lent in its current state
    NotAvailable { book_id: String, status: String },
    /// Member is not allowed to borrow
    MemberInactive { member_id: String, status: String },
    /// Transaction was already returned
    AlreadyCompleted { transaction_id: String },
    /// More than one outstanding loan references the same book
    AmbiguousState { book_id: String, active_loans: usize },
    /// Validation error with message
    Validation(String),
    /// Caller's snapshot version is stale
    Conflict { expected: u64, actual: u64 },
}

impl DomainError {
    pub fn not_found(entity: Entity, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Stable machine-readable name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound { .. } => "not_found",
            DomainError::NotAvailable { .. } => "not_available",
            DomainError::MemberInactive { .. } => "member_inactive",
            DomainError::AlreadyCompleted { .. } => "already_completed",
            DomainError::AmbiguousState { .. } => "ambiguous_state",
            DomainError::Validation(_) => "validation",
            DomainError::Conflict { .. } => "conflict",
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound { entity, id } => write!(f, "{} '{}' not found", entity, id),
            DomainError::NotAvailable { book_id, status } => {
                write!(f, "Book '{}' is not available (currently {})", book_id, status)
            }
            DomainError::MemberInactive { member_id, status } => {
                write!(f, "Member '{}' cannot borrow (status {})", member_id, status)
            }
            DomainError::AlreadyCompleted { transaction_id } => {
                write!(f, "Transaction '{}' is already returned", transaction_id)
            }
            DomainError::AmbiguousState {
                book_id,
                active_loans,
            } => write!(
                f,
                "Book '{}' has {} active loans, expected at most one",
                book_id, active_loans
            ),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::Conflict { expected, actual } => write!(
                f,
                "Snapshot version {} is stale (current version is {})",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_record() {
        let err = DomainError::not_found(Entity::Member, "m42");
        assert_eq!(err.to_string(), "Member 'm42' not found");
        assert_eq!(err.kind(), "not_found");

        let err = DomainError::AlreadyCompleted {
            transaction_id: "tr3".to_string(),
        };
        assert_eq!(err.to_string(), "Transaction 'tr3' is already returned");
    }
}
