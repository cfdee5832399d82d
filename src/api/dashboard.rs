use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::infrastructure::AppState;
use crate::services::dashboard_service::{
    self, DashboardSummary, LoanDetails, OverdueLoan, StatusCount,
};

const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Circulation summary", body = DashboardSummary)
    )
)]
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSummary> {
    let now = state.now();
    let store = state.store().read().await;

    Json(dashboard_service::summarize(
        store.snapshot(),
        now,
        state.config.due_soon_days,
    ))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/books-by-status",
    responses(
        (status = 200, description = "Book counts per status", body = [StatusCount])
    )
)]
pub async fn books_by_status(State(state): State<AppState>) -> Json<Vec<StatusCount>> {
    let store = state.store().read().await;
    Json(dashboard_service::books_by_status(&store.snapshot().books))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/recent-transactions",
    params(RecentQuery),
    responses(
        (status = 200, description = "Latest checkouts first", body = [LoanDetails])
    )
)]
pub async fn recent_transactions(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Json<Vec<LoanDetails>> {
    let now = state.now();
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let store = state.store().read().await;

    Json(dashboard_service::recent_transactions(store.snapshot(), now, limit))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/overdue",
    responses(
        (status = 200, description = "Overdue loans, most overdue first", body = [OverdueLoan])
    )
)]
pub async fn overdue_books(State(state): State<AppState>) -> Json<Vec<OverdueLoan>> {
    let now = state.now();
    let store = state.store().read().await;

    Json(dashboard_service::overdue_loans(store.snapshot(), now))
}
