use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::IntoParams;

use crate::domain::{DomainError, Entity};
use crate::infrastructure::AppState;
use crate::models::Book;
use crate::services::book_service::{self, BookFilter, GENRES};
use crate::services::loan_service;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListBooksQuery {
    /// Title or author (any case), or part of the ISBN
    pub query: Option<String>,
    pub genre: Option<String>,
    /// `available` or `checked-out`
    pub availability: Option<String>,
}

impl From<ListBooksQuery> for BookFilter {
    fn from(q: ListBooksQuery) -> Self {
        BookFilter {
            query: q.query,
            genre: q.genre,
            availability: q.availability,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct SearchBooksQuery {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub available_only: bool,
}

#[utoipa::path(
    get,
    path = "/api/books",
    params(ListBooksQuery),
    responses(
        (status = 200, description = "Books matching the filter, in catalog order")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Json<Value> {
    let filter = BookFilter::from(query);
    let store = state.store().read().await;
    let books = book_service::filter_books(&store.snapshot().books, &filter);

    Json(json!({
        "books": books,
        "total": books.len(),
        "version": store.version(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/books/search",
    params(SearchBooksQuery),
    responses(
        (status = 200, description = "Catalog search results", body = [Book])
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<SearchBooksQuery>,
) -> Json<Vec<Book>> {
    let store = state.store().read().await;
    let books = book_service::search_books(
        &store.snapshot().books,
        &query.search_term,
        &query.genre,
        query.available_only,
    );

    Json(books.into_iter().cloned().collect())
}

#[utoipa::path(
    get,
    path = "/api/books/genres",
    responses(
        (status = 200, description = "Genre picklist", body = [String])
    )
)]
pub async fn list_genres() -> Json<Vec<&'static str>> {
    Json(GENRES.to_vec())
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book with its outstanding loan and borrower"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, DomainError> {
    let store = state.store().read().await;
    let snapshot = store.snapshot();

    let book = snapshot
        .book(&id)
        .ok_or_else(|| DomainError::not_found(Entity::Book, &id))?;
    let active_loan = loan_service::active_loan_for(&snapshot.transactions, &id)?;
    let borrower = active_loan.and_then(|t| snapshot.member(&t.member_id));

    Ok(Json(json!({
        "book": book,
        "activeLoan": active_loan,
        "borrower": borrower,
    })))
}

#[utoipa::path(
    post,
    path = "/api/books/{id}/return",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Outstanding loan closed"),
        (status = 404, description = "Book not found or not on loan"),
        (status = 500, description = "Book has more than one open loan")
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, DomainError> {
    let now = state.now();
    let (version, transaction) = state
        .commit(None, |snapshot| {
            loan_service::return_by_book(snapshot, &id, now).map(|o| (o.snapshot, o.transaction))
        })
        .await?;

    Ok(Json(json!({
        "transaction": transaction,
        "version": version,
    })))
}
