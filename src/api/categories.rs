//! Category endpoints.

use crate::{
    api::{AppState, extract::CurrentUser},
    core::category,
    entities::category::Model,
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: Option<String>,
}

fn required_name(body: CategoryRequest) -> Result<String> {
    body.name.ok_or_else(|| Error::Validation {
        message: "name is required".to_string(),
    })
}

/// `GET /api/categories`
pub async fn list(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<Model>>> {
    Ok(Json(
        category::list_categories(&state.db, user.profile.id).await?,
    ))
}

/// `POST /api/categories`
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CategoryRequest>,
) -> Result<Json<Model>> {
    let name = required_name(body)?;
    Ok(Json(
        category::create_category(&state.db, user.profile.id, &name).await?,
    ))
}

/// `PUT /api/categories/{id}`
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(body): Json<CategoryRequest>,
) -> Result<Json<Model>> {
    let name = required_name(body)?;
    Ok(Json(
        category::update_category(&state.db, user.profile.id, id, &name).await?,
    ))
}

/// `DELETE /api/categories/{id}` - detaches the caller's transactions, then
/// deletes.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    category::delete_category(&state.db, user.profile.id, id).await?;
    Ok(Json(json!({ "message": "category deleted" })))
}
