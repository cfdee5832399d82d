pub mod books;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod loan;
pub mod members;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Books
        .route("/books", get(books::list_books))
        .route("/books/search", get(books::search_books))
        .route("/books/genres", get(books::list_genres))
        .route("/books/:id", get(books::get_book))
        .route("/books/:id/return", post(books::return_book))
        // Members
        .route(
            "/members",
            get(members::list_members).post(members::create_member),
        )
        .route("/members/:id", get(members::get_member))
        // Loans
        .route("/loans", get(loan::list_loans).post(loan::create_loan))
        .route("/loans/:id/return", put(loan::return_loan))
        // Dashboard
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/dashboard/books-by-status", get(dashboard::books_by_status))
        .route(
            "/dashboard/recent-transactions",
            get(dashboard::recent_transactions),
        )
        .route("/dashboard/overdue", get(dashboard::overdue_books))
        .with_state(state)
}
