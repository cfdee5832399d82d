use crate::api;
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::books::list_books,
        api::books::search_books,
        api::books::list_genres,
        api::books::get_book,
        api::books::return_book,
        api::members::list_members,
        api::members::get_member,
        api::members::create_member,
        api::loan::list_loans,
        api::loan::create_loan,
        api::loan::return_loan,
        api::dashboard::get_dashboard,
        api::dashboard::books_by_status,
        api::dashboard::recent_transactions,
        api::dashboard::overdue_books,
    ),
    components(
        schemas(
            crate::models::Book,
            crate::models::BookStatus,
            crate::models::Member,
            crate::models::MemberStatus,
            crate::models::NewMember,
            crate::models::Transaction,
            crate::models::TransactionStatus,
            crate::models::LoanState,
            crate::services::dashboard_service::DashboardSummary,
            crate::services::dashboard_service::GenreCount,
            crate::services::dashboard_service::StatusCount,
            crate::services::dashboard_service::LoanDetails,
            crate::services::dashboard_service::OverdueLoan,
            api::loan::CheckoutRequest,
            api::loan::ReturnRequest,
        )
    ),
    tags(
        (name = "circulation-desk", description = "Circulation Desk API")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
