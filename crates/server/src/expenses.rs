//! Expenses API endpoints.

use api_types::expense::{ExpenseList, ExpenseRequest, ExpenseResponse};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ExpenseResponse>), ServerError> {
    let Json(payload) = payload?;
    let expense = state.engine.expenses().create(payload).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// `category_id` missing or `<= 0` lists every category.
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ExpenseList>, QueryRejection>,
) -> Result<Json<Vec<ExpenseResponse>>, ServerError> {
    let Query(query) = query?;
    let page = query.page();
    let expenses = state
        .engine
        .expenses()
        .list(
            page.offset(),
            page.limit(),
            query.description.as_deref(),
            query.category_id.unwrap_or_default(),
        )
        .await?;
    Ok(Json(expenses))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ExpenseResponse>, ServerError> {
    let Path(id) = id?;
    Ok(Json(state.engine.expenses().get(id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ExpenseRequest>, JsonRejection>,
) -> Result<Json<ExpenseResponse>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(state.engine.expenses().update(id, payload).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;
    state.engine.expenses().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
