//! Profile endpoints: reading the caller's profile, updating names and
//! limits, and the onboarding write that connects a WhatsApp number.

use crate::{
    api::{AppState, extract::CurrentUser},
    core::profile,
    entities::profile::Model,
    errors::{Error, Result},
};
use axum::{Json, extract::State};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLimitsRequest {
    pub monthly_budget: Option<f64>,
    pub monthly_transaction_limit: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ConnectWhatsappRequest {
    pub whatsapp_number: Option<String>,
}

/// `GET /api/profile`
pub async fn get(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Model>> {
    Ok(Json(profile::get_profile(&state.db, user.profile.id).await?))
}

/// `PUT /api/profile`
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<Model>> {
    let updated =
        profile::update_profile(&state.db, user.profile.id, body.first_name, body.last_name)
            .await?;
    Ok(Json(updated))
}

/// `PUT /api/profile/limits`
pub async fn update_limits(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<UpdateLimitsRequest>,
) -> Result<Json<Model>> {
    let updated = profile::update_limits(
        &state.db,
        user.profile.id,
        body.monthly_budget,
        body.monthly_transaction_limit,
    )
    .await?;
    Ok(Json(updated))
}

/// `PUT /api/profile/whatsapp` - the onboarding write.
pub async fn connect_whatsapp(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<ConnectWhatsappRequest>,
) -> Result<Json<Model>> {
    let number = body.whatsapp_number.ok_or_else(|| Error::Validation {
        message: "whatsapp_number is required".to_string(),
    })?;
    let updated = profile::connect_whatsapp(&state.db, user.profile.id, &number).await?;
    Ok(Json(updated))
}
