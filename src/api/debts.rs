//! Debt endpoints, including the payment increment.

use crate::{
    api::{AppState, extract::CurrentUser},
    core::debt,
    entities::debt::Model,
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
pub struct DebtRequest {
    pub name: Option<String>,
    pub total_amount: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub creditor: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub amount: Option<f64>,
}

fn missing(name: &str) -> Error {
    Error::Validation {
        message: format!("{name} is required"),
    }
}

/// `GET /api/debts`
pub async fn list(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<Model>>> {
    Ok(Json(debt::list_debts(&state.db, user.profile.id).await?))
}

/// `POST /api/debts`
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<DebtRequest>,
) -> Result<Json<Model>> {
    let name = body.name.ok_or_else(|| missing("name"))?;
    let total = body.total_amount.ok_or_else(|| missing("total_amount"))?;
    let due = body.due_date.ok_or_else(|| missing("due_date"))?;
    let creditor = body.creditor.unwrap_or_default();

    Ok(Json(
        debt::create_debt(&state.db, user.profile.id, &name, total, due, &creditor).await?,
    ))
}

/// `PUT /api/debts/{id}`
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(body): Json<DebtRequest>,
) -> Result<Json<Model>> {
    let name = body.name.ok_or_else(|| missing("name"))?;
    let total = body.total_amount.ok_or_else(|| missing("total_amount"))?;
    let due = body.due_date.ok_or_else(|| missing("due_date"))?;
    let creditor = body.creditor.unwrap_or_default();
    let status = body.status.unwrap_or_else(|| debt::STATUS_ACTIVE.to_string());

    Ok(Json(
        debt::update_debt(
            &state.db,
            user.profile.id,
            id,
            &name,
            total,
            due,
            &creditor,
            &status,
        )
        .await?,
    ))
}

/// `POST /api/debts/{id}/payments` - atomic increment of the paid amount.
pub async fn record_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(body): Json<PaymentRequest>,
) -> Result<Json<Model>> {
    let amount = body.amount.ok_or_else(|| missing("amount"))?;
    Ok(Json(
        debt::record_payment(&state.db, user.profile.id, id, amount).await?,
    ))
}

/// `DELETE /api/debts/{id}`
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    debt::delete_debt(&state.db, user.profile.id, id).await?;
    Ok(Json(json!({ "message": "debt deleted" })))
}
