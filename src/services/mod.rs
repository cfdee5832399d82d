//! Services Layer
//!
//! Pure business logic extracted from HTTP handlers. Every service works on
//! a `Snapshot` passed in by the caller and can be called directly or
//! through the Axum handlers.

pub mod book_service;
pub mod dashboard_service;
pub mod loan_service;
pub mod member_service;

// Re-export for convenience
pub use book_service::{filter_books, search_books, BookFilter};
pub use dashboard_service::{summarize, DashboardSummary};
pub use loan_service::{checkout, return_book, return_by_book, LoanOutcome};
pub use member_service::{filter_members, member_summaries, MemberSummary};
