//! Ledger endpoints.
//!
//! List responses denormalize the category name so clients render rows
//! without a second request.

use crate::{
    api::{AppState, extract::CurrentUser},
    core::transaction,
    entities::{TransactionKind, category, transaction::Model},
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub kind: Option<TransactionKind>,
    pub category_id: Option<i64>,
    pub transaction_date: Option<NaiveDate>,
}

/// A ledger row with its category name joined in.
#[derive(Debug, Serialize)]
pub struct TransactionView {
    #[serde(flatten)]
    pub transaction: Model,
    pub category_name: Option<String>,
}

impl From<(Model, Option<category::Model>)> for TransactionView {
    fn from((transaction, category): (Model, Option<category::Model>)) -> Self {
        Self {
            transaction,
            category_name: category.map(|c| c.name),
        }
    }
}

struct ValidatedRequest {
    amount: f64,
    description: String,
    kind: TransactionKind,
    category_id: Option<i64>,
    transaction_date: NaiveDate,
}

fn validate(body: TransactionRequest) -> Result<ValidatedRequest> {
    let missing = |name: &str| Error::Validation {
        message: format!("{name} is required"),
    };
    Ok(ValidatedRequest {
        amount: body.amount.ok_or_else(|| missing("amount"))?,
        description: body.description.ok_or_else(|| missing("description"))?,
        kind: body.kind.ok_or_else(|| missing("kind"))?,
        category_id: body.category_id,
        transaction_date: body
            .transaction_date
            .ok_or_else(|| missing("transaction_date"))?,
    })
}

/// `GET /api/transactions`
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<TransactionView>>> {
    let rows = transaction::list_transactions(&state.db, user.profile.id).await?;
    Ok(Json(rows.into_iter().map(TransactionView::from).collect()))
}

/// `POST /api/transactions`
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<TransactionRequest>,
) -> Result<Json<Model>> {
    let req = validate(body)?;
    let created = transaction::create_transaction(
        &state.db,
        user.profile.id,
        req.amount,
        &req.description,
        req.kind,
        req.category_id,
        req.transaction_date,
    )
    .await?;
    Ok(Json(created))
}

/// `PUT /api/transactions/{id}`
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(body): Json<TransactionRequest>,
) -> Result<Json<Model>> {
    let req = validate(body)?;
    let updated = transaction::update_transaction(
        &state.db,
        user.profile.id,
        id,
        req.amount,
        &req.description,
        req.kind,
        req.category_id,
        req.transaction_date,
    )
    .await?;
    Ok(Json(updated))
}

/// `DELETE /api/transactions/{id}`
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    transaction::delete_transaction(&state.db, user.profile.id, id).await?;
    Ok(Json(json!({ "message": "transaction deleted" })))
}
