//! Categories API endpoints.

use api_types::category::{CategoryList, CategoryRequest, CategoryResponse};
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
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryResponse>), ServerError> {
    let Json(payload) = payload?;
    let category = state.engine.categories().create(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<CategoryList>, QueryRejection>,
) -> Result<Json<Vec<CategoryResponse>>, ServerError> {
    let Query(query) = query?;
    let page = query.page();
    let categories = state
        .engine
        .categories()
        .list(page.offset(), page.limit(), query.name.as_deref())
        .await?;
    Ok(Json(categories))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<CategoryResponse>, ServerError> {
    let Path(id) = id?;
    Ok(Json(state.engine.categories().get(id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Json<CategoryResponse>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(state.engine.categories().update(id, payload).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;
    state.engine.categories().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
