//! Request guard: resolves the bearer token to a profile before any
//! handler body runs.
//!
//! Handlers declare [`CurrentUser`] as an argument; a missing, unknown, or
//! expired token short-circuits the request with 401 and no data is ever
//! fetched for it.

use crate::{api::AppState, core::session, entities::profile, errors::Error};
use axum::{extract::FromRequestParts, http::header, http::request::Parts};

/// The authenticated caller, resolved from the `Authorization` header.
pub struct CurrentUser {
    /// The caller's profile row
    pub profile: profile::Model,
    /// The raw session token, kept around so logout can revoke it
    pub token: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(Error::Unauthorized)?
            .to_string();

        let profile = session::authenticate(&state.db, &token).await?;
        Ok(Self { profile, token })
    }
}
