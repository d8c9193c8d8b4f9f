//! Goal endpoints, including the progress increment.

use crate::{
    api::{AppState, extract::CurrentUser},
    core::goal,
    entities::goal::Model,
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub name: Option<String>,
    pub target_amount: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub amount: Option<f64>,
}

fn missing(name: &str) -> Error {
    Error::Validation {
        message: format!("{name} is required"),
    }
}

/// `GET /api/goals`
pub async fn list(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<Model>>> {
    Ok(Json(goal::list_goals(&state.db, user.profile.id).await?))
}

/// `POST /api/goals`
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<GoalRequest>,
) -> Result<Json<Model>> {
    let name = body.name.ok_or_else(|| missing("name"))?;
    let target = body.target_amount.ok_or_else(|| missing("target_amount"))?;
    let due = body.due_date.ok_or_else(|| missing("due_date"))?;

    Ok(Json(
        goal::create_goal(&state.db, user.profile.id, &name, target, due).await?,
    ))
}

/// `PUT /api/goals/{id}`
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(body): Json<GoalRequest>,
) -> Result<Json<Model>> {
    let name = body.name.ok_or_else(|| missing("name"))?;
    let target = body.target_amount.ok_or_else(|| missing("target_amount"))?;
    let due = body.due_date.ok_or_else(|| missing("due_date"))?;
    let status = body.status.unwrap_or_else(|| goal::STATUS_ACTIVE.to_string());

    Ok(Json(
        goal::update_goal(&state.db, user.profile.id, id, &name, target, due, &status).await?,
    ))
}

/// `POST /api/goals/{id}/progress` - atomic increment of saved money.
pub async fn add_progress(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(body): Json<ProgressRequest>,
) -> Result<Json<Model>> {
    let amount = body.amount.ok_or_else(|| missing("amount"))?;
    Ok(Json(
        goal::add_progress(&state.db, user.profile.id, id, amount).await?,
    ))
}

/// `DELETE /api/goals/{id}`
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    goal::delete_goal(&state.db, user.profile.id, id).await?;
    Ok(Json(json!({ "message": "goal deleted" })))
}
