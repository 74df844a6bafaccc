use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    items::{dto::CreateItemRequest, dto::ItemResponse, services},
    state::AppState,
};

pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/item", post(create_item))
        .route("/items", get(list_items))
        .route("/item/:id", delete(delete_item))
}

#[instrument(skip(state, user, payload), fields(user_id = user.id, email = %user.email))]
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let item = services::create_item(&state.db, user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn list_items(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response, ApiError> {
    let items = services::list_items(&state.db, user.id).await?;
    if items.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok((StatusCode::OK, Json(items)).into_response())
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    services::delete_item(&state.db, id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
