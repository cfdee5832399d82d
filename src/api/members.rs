use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::IntoParams;

use crate::domain::{DomainError, Entity};
use crate::infrastructure::AppState;
use crate::models::{NewMember, TransactionView};
use crate::services::member_service;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MembersQuery {
    /// Name or email (any case), or part of the phone number
    #[serde(default)]
    pub search: String,
}

#[utoipa::path(
    get,
    path = "/api/members",
    params(MembersQuery),
    responses(
        (status = 200, description = "Members with their current loan counts")
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<MembersQuery>,
) -> Json<Value> {
    let store = state.store().read().await;
    let snapshot = store.snapshot();

    let matched = member_service::filter_members(&snapshot.members, &params.search);
    let members = member_service::member_summaries(matched, &snapshot.transactions);

    Json(json!({
        "members": members,
        "total": members.len(),
        "version": store.version(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/members/{id}",
    params(("id" = String, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member with their outstanding loans"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, DomainError> {
    let now = state.now();
    let store = state.store().read().await;
    let snapshot = store.snapshot();

    let member = snapshot
        .member(&id)
        .ok_or_else(|| DomainError::not_found(Entity::Member, &id))?;
    let summary = member_service::member_summaries([member], &snapshot.transactions);
    let loans: Vec<TransactionView> = member_service::borrowed_by(&snapshot.transactions, &id)
        .into_iter()
        .map(|t| TransactionView::at(t.clone(), now))
        .collect();

    Ok(Json(json!({
        "member": summary.first(),
        "loans": loans,
    })))
}

#[utoipa::path(
    post,
    path = "/api/members",
    request_body = NewMember,
    responses(
        (status = 201, description = "Member enrolled"),
        (status = 400, description = "Invalid name or email")
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    Json(payload): Json<NewMember>,
) -> Result<(StatusCode, Json<Value>), DomainError> {
    let today = state.now().date_naive();

    let (version, member) = state
        .commit(None, |snapshot| member_service::enrol_member(snapshot, payload, today))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "member": member,
            "version": version,
        })),
    ))
}
