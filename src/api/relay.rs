//! WhatsApp notification endpoint.
//!
//! The caller names the target profile; a profile without a connected
//! number is 404 before any provider traffic, and missing provider
//! credentials are a configuration error (500).

use crate::{
    api::{AppState, extract::CurrentUser},
    core::relay::{self, RelayReceipt},
    errors::{Error, Result},
};
use axum::{Json, extract::State};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
    pub message: Option<String>,
}

/// `POST /api/notifications/whatsapp`
///
/// The body names the target profile, but the lookup is scoped to the
/// caller; another user's id comes back 404.
pub async fn send(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<RelayReceipt>> {
    let missing = |name: &str| Error::Validation {
        message: format!("{name} is required"),
    };
    let user_id = body.user_id.ok_or_else(|| missing("userId"))?;
    let message = body.message.ok_or_else(|| missing("message"))?;

    let receipt = relay::send_whatsapp(
        &state.db,
        &state.http,
        state.relay.as_ref(),
        user.profile.id,
        user_id,
        &message,
    )
    .await?;
    Ok(Json(receipt))
}
