use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::{IntoParams, ToSchema};

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::{LoanState, TransactionView};
use crate::services::loan_service;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ListLoansQuery {
    /// `active`, `overdue` or `completed`, evaluated now
    pub state: Option<LoanState>,
    pub member_id: Option<String>,
    pub book_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub book_id: String,
    pub member_id: String,
    /// Defaults to the configured loan period
    pub days_to_return: Option<i64>,
    /// Reject the checkout if the store has moved past this version
    pub expected_version: Option<u64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub expected_version: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/loans",
    params(ListLoansQuery),
    responses(
        (status = 200, description = "Loans with their state as of now")
    )
)]
pub async fn list_loans(
    State(state): State<AppState>,
    Query(query): Query<ListLoansQuery>,
) -> Json<Value> {
    let now = state.now();
    let store = state.store().read().await;

    let loans: Vec<TransactionView> = store
        .snapshot()
        .transactions
        .iter()
        .filter(|t| query.member_id.as_deref().is_none_or(|id| t.member_id == id))
        .filter(|t| query.book_id.as_deref().is_none_or(|id| t.book_id == id))
        .map(|t| TransactionView::at(t.clone(), now))
        .filter(|v| query.state.is_none_or(|s| v.state == s))
        .collect();

    Json(json!({
        "loans": loans,
        "total": loans.len(),
        "version": store.version(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/loans",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Book checked out"),
        (status = 404, description = "Unknown book or member"),
        (status = 409, description = "Book not available, member inactive or stale version")
    )
)]
pub async fn create_loan(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Value>), DomainError> {
    let now = state.now();
    let loan_days = payload.days_to_return.unwrap_or(state.config.loan_days);

    let (version, transaction) = state
        .commit(payload.expected_version, |snapshot| {
            loan_service::checkout(snapshot, &payload.book_id, &payload.member_id, loan_days, now)
                .map(|o| (o.snapshot, o.transaction))
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "transaction": transaction,
            "version": version,
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/api/loans/{id}/return",
    params(("id" = String, Path, description = "Transaction id")),
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Loan returned"),
        (status = 404, description = "Unknown transaction"),
        (status = 409, description = "Already returned or stale version")
    )
)]
pub async fn return_loan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<ReturnRequest>>,
) -> Result<Json<Value>, DomainError> {
    let now = state.now();
    let expected_version = payload.and_then(|Json(p)| p.expected_version);

    let (version, transaction) = state
        .commit(expected_version, |snapshot| {
            loan_service::return_book(snapshot, &id, now).map(|o| (o.snapshot, o.transaction))
        })
        .await?;

    Ok(Json(json!({
        "transaction": transaction,
        "version": version,
    })))
}
