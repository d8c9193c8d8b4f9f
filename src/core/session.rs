//! Session business logic - signup, login, token resolution, logout.
//!
//! The session is an explicit object with a defined lifecycle: created at
//! login, resolved on every request, deleted at logout. There is no ambient
//! auth state; everything that needs the caller takes the resolved profile
//! as an argument.

use crate::{
    config::defaults,
    entities::{Profile, Session, category, profile, session},
    errors::{Error, Result},
};
use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use uuid::Uuid;

/// How long a session token stays valid.
const SESSION_TTL_DAYS: i64 = 30;

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

/// What the client needs to branch between onboarding and the dashboard
/// after authentication.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    /// Authenticated profile id
    pub profile_id: i64,
    /// Login email
    pub email: String,
    /// True once the user has connected a WhatsApp number; the client
    /// routes to onboarding while this is false
    pub onboarded: bool,
}

/// Creates a profile, seeds its default categories, and opens a session.
///
/// Email and password are validated before any data access. The profile
/// insert and category seeding happen in one database transaction.
pub async fn signup(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<(profile::Model, session::Model)> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::Validation {
            message: "a valid email is required".to_string(),
        });
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(Error::Validation {
            message: format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        });
    }

    let existing = Profile::find()
        .filter(profile::Column::Email.eq(&email))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::Validation {
            message: "email is already registered".to_string(),
        });
    }

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| Error::Config {
        message: format!("password hashing failed: {e}"),
    })?;

    let txn = db.begin().await?;

    let now = Utc::now();
    let new_profile = profile::ActiveModel {
        email: Set(email),
        password_hash: Set(password_hash),
        first_name: Set(first_name),
        last_name: Set(last_name),
        whatsapp_number: Set(None),
        monthly_transaction_limit: Set(None),
        transactions_this_month: Set(0),
        monthly_budget: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = new_profile.insert(&txn).await?;

    // Seed the starter categories so the transaction form is usable on
    // first login. No config.toml means no seeding.
    let seed = defaults::load_default_config();
    for name in seed.default_categories {
        category::ActiveModel {
            profile_id: Set(created.id),
            name: Set(name),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    let session = open_session(db, created.id).await?;
    tracing::info!(profile_id = created.id, "profile created");

    Ok((created, session))
}

/// Verifies credentials and opens a new session.
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<(profile::Model, session::Model)> {
    let email = email.trim().to_lowercase();
    let profile = Profile::find()
        .filter(profile::Column::Email.eq(&email))
        .one(db)
        .await?
        .ok_or(Error::Unauthorized)?;

    let matches = bcrypt::verify(password, &profile.password_hash).unwrap_or(false);
    if !matches {
        return Err(Error::Unauthorized);
    }

    let session = open_session(db, profile.id).await?;
    Ok((profile, session))
}

/// Inserts a fresh session row with a random token and a fixed TTL.
async fn open_session(db: &DatabaseConnection, profile_id: i64) -> Result<session::Model> {
    let now = Utc::now();
    let model = session::ActiveModel {
        token: Set(Uuid::new_v4().to_string()),
        profile_id: Set(profile_id),
        created_at: Set(now),
        expires_at: Set(now + Duration::days(SESSION_TTL_DAYS)),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Resolves a bearer token to its profile.
///
/// This is the guard: it runs before any data access for the request, and
/// an unknown or expired token is `Unauthorized`.
pub async fn authenticate(db: &DatabaseConnection, token: &str) -> Result<profile::Model> {
    let session = Session::find()
        .filter(session::Column::Token.eq(token))
        .one(db)
        .await?
        .ok_or(Error::Unauthorized)?;

    if session.expires_at < Utc::now() {
        return Err(Error::Unauthorized);
    }

    Profile::find_by_id(session.profile_id)
        .one(db)
        .await?
        .ok_or(Error::Unauthorized)
}

/// Deletes the session row for `token`. Unknown tokens are a no-op so
/// logout is idempotent.
pub async fn logout(db: &DatabaseConnection, token: &str) -> Result<()> {
    Session::delete_many()
        .filter(session::Column::Token.eq(token))
        .exec(db)
        .await?;
    Ok(())
}

/// Builds the onboarding-vs-dashboard branch for an authenticated profile.
///
/// The check is a plain read. Two rapid auth events can both see
/// `onboarded == false` and steer to onboarding twice; that is benign
/// because onboarding is an idempotent profile update.
#[must_use]
pub fn session_state(profile: &profile::Model) -> SessionState {
    SessionState {
        profile_id: profile.id,
        email: profile.email.clone(),
        onboarded: profile.whatsapp_number.is_some(),
    }
}

/// Lists the profile's categories ordered by name. Lives here so signup
/// tests can verify seeding without reaching into the category module.
pub async fn seeded_categories(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<category::Model>> {
    crate::entities::Category::find()
        .filter(category::Column::ProfileId.eq(profile_id))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_signup_creates_profile_and_session() -> Result<()> {
        let db = setup_test_db().await?;

        let (profile, session) = signup(
            &db,
            "ana@example.com",
            "correct horse",
            Some("Ana".to_string()),
            None,
        )
        .await?;

        assert_eq!(profile.email, "ana@example.com");
        assert_eq!(profile.transactions_this_month, 0);
        assert!(profile.whatsapp_number.is_none());
        assert_eq!(session.profile_id, profile.id);
        assert!(session.expires_at > Utc::now());

        Ok(())
    }

    #[tokio::test]
    async fn test_signup_rejects_bad_email_and_short_password() -> Result<()> {
        let db = setup_test_db().await?;

        let result = signup(&db, "not-an-email", "long enough pw", None, None).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = signup(&db, "ana@example.com", "short", None, None).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_email() -> Result<()> {
        let db = setup_test_db().await?;

        signup(&db, "ana@example.com", "correct horse", None, None).await?;
        let result = signup(&db, "Ana@Example.com", "correct horse", None, None).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        signup(&db, "ana@example.com", "correct horse", None, None).await?;

        let (profile, session) = login(&db, "ana@example.com", "correct horse").await?;
        assert_eq!(profile.email, "ana@example.com");

        let resolved = authenticate(&db, &session.token).await?;
        assert_eq!(resolved.id, profile.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() -> Result<()> {
        let db = setup_test_db().await?;
        signup(&db, "ana@example.com", "correct horse", None, None).await?;

        let result = login(&db, "ana@example.com", "wrong password").await;
        assert!(matches!(result, Err(Error::Unauthorized)));

        let result = login(&db, "nobody@example.com", "correct horse").await;
        assert!(matches!(result, Err(Error::Unauthorized)));

        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate_unknown_token() -> Result<()> {
        let db = setup_test_db().await?;

        let result = authenticate(&db, "no-such-token").await;
        assert!(matches!(result, Err(Error::Unauthorized)));

        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate_expired_session() -> Result<()> {
        let db = setup_test_db().await?;
        let (profile, _) = signup(&db, "ana@example.com", "correct horse", None, None).await?;

        let stale = session::ActiveModel {
            token: Set("expired-token".to_string()),
            profile_id: Set(profile.id),
            created_at: Set(Utc::now() - Duration::days(60)),
            expires_at: Set(Utc::now() - Duration::days(30)),
            ..Default::default()
        };
        stale.insert(&db).await?;

        let result = authenticate(&db, "expired-token").await;
        assert!(matches!(result, Err(Error::Unauthorized)));

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_invalidates_token() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, session) = signup(&db, "ana@example.com", "correct horse", None, None).await?;

        logout(&db, &session.token).await?;
        let result = authenticate(&db, &session.token).await;
        assert!(matches!(result, Err(Error::Unauthorized)));

        // Idempotent: logging out again is fine
        logout(&db, &session.token).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_session_state_onboarding_branch() -> Result<()> {
        let db = setup_test_db().await?;
        let (profile, _) = signup(&db, "ana@example.com", "correct horse", None, None).await?;

        let state = session_state(&profile);
        assert!(!state.onboarded);

        let updated =
            crate::core::profile::connect_whatsapp(&db, profile.id, "+5511999990000").await?;
        let state = session_state(&updated);
        assert!(state.onboarded);

        Ok(())
    }
}
