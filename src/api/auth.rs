//! Authentication endpoints: signup, login, logout, and the session probe
//! the client uses to branch between onboarding and the dashboard.

use crate::{
    api::{AppState, extract::CurrentUser},
    core::session::{self, SessionState},
    errors::{Error, Result},
};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Token plus the state the client branches on.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(flatten)]
    pub state: SessionState,
}

fn required(field: Option<String>, name: &str) -> Result<String> {
    field.ok_or_else(|| Error::Validation {
        message: format!("{name} is required"),
    })
}

/// `POST /api/auth/signup`
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<AuthResponse>> {
    let email = required(body.email, "email")?;
    let password = required(body.password, "password")?;

    let (profile, session) =
        session::signup(&state.db, &email, &password, body.first_name, body.last_name).await?;

    Ok(Json(AuthResponse {
        token: session.token,
        state: session::session_state(&profile),
    }))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let email = required(body.email, "email")?;
    let password = required(body.password, "password")?;

    let (profile, session) = session::login(&state.db, &email, &password).await?;

    Ok(Json(AuthResponse {
        token: session.token,
        state: session::session_state(&profile),
    }))
}

/// `POST /api/auth/logout` - revokes the caller's own token.
pub async fn logout(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Value>> {
    session::logout(&state.db, &user.token).await?;
    Ok(Json(json!({ "message": "logged out" })))
}

/// `GET /api/session` - who am I, and am I onboarded yet.
pub async fn current_session(user: CurrentUser) -> Json<SessionState> {
    Json(session::session_state(&user.profile))
}
