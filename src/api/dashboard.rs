//! Dashboard endpoint: the six-month aggregation in one response.

use crate::{
    api::{AppState, extract::CurrentUser},
    core::dashboard::{self, DashboardSummary},
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Reference date, `YYYY-MM-DD`; defaults to today. Mostly useful for
    /// reproducing a past month's view.
    pub reference_date: Option<String>,
}

/// `GET /api/dashboard`
pub async fn get(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSummary>> {
    let reference = match query.reference_date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| Error::Validation {
            message: format!("invalid date: {raw}"),
        })?,
        None => Utc::now().date_naive(),
    };

    let summary = dashboard::load_dashboard(&state.db, user.profile.id, reference).await?;
    Ok(Json(summary))
}
