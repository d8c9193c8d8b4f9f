//! WhatsApp relay - sends a message to a profile's connected number via the
//! upstream messaging provider.
//!
//! The order of failures matters: the profile's number is resolved first, so
//! a user without a connected number gets a 404 before any provider call,
//! and missing credentials surface as a configuration error. Provider
//! rejections pass through with the provider's own status and body.

use crate::{
    config::relay::RelayConfig,
    entities::{Profile, profile},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, prelude::*};
use serde::Serialize;
use serde_json::Value;

/// What the relay endpoint returns on success: the provider's response
/// echoed verbatim next to a confirmation message.
#[derive(Debug, Serialize)]
pub struct RelayReceipt {
    /// Human-readable confirmation
    pub message: &'static str,
    /// Provider JSON, untouched
    pub provider_response: Value,
}

/// Builds the provider's form body for one outbound message.
///
/// The recipient number gets the `whatsapp:` channel prefix; the sender is
/// assumed to carry it already (it comes prefixed from configuration).
fn message_form<'a>(config: &'a RelayConfig, to_number: &str, body: &'a str) -> [(&'a str, String); 3] {
    [
        ("To", format!("whatsapp:{to_number}")),
        ("From", config.from_number.clone()),
        ("Body", body.to_string()),
    ]
}

/// Sends `body` to the target profile's WhatsApp number.
///
/// Row-level scoping applies here like everywhere else in `core`: the
/// target must be the authenticated caller, and anyone else's id is
/// indistinguishable from a missing profile. Failure order matches the
/// endpoint contract: empty message, then a missing profile or number
/// ([`Error::NotFound`], no outbound HTTP), then absent provider
/// credentials ([`Error::Config`]).
pub async fn send_whatsapp(
    db: &DatabaseConnection,
    http: &reqwest::Client,
    config: Option<&RelayConfig>,
    caller_profile_id: i64,
    target_profile_id: i64,
    body: &str,
) -> Result<RelayReceipt> {
    if body.trim().is_empty() {
        return Err(Error::Validation {
            message: "message body is required".to_string(),
        });
    }

    let profile = Profile::find_by_id(target_profile_id)
        .filter(profile::Column::Id.eq(caller_profile_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "profile",
            id: target_profile_id.to_string(),
        })?;

    let Some(number) = profile.whatsapp_number.as_deref() else {
        return Err(Error::NotFound {
            entity: "whatsapp number for profile",
            id: target_profile_id.to_string(),
        });
    };

    let config = config.ok_or_else(|| Error::Config {
        message: "messaging provider is not configured".to_string(),
    })?;

    let response = http
        .post(&config.api_url)
        .basic_auth(&config.account_sid, Some(&config.auth_token))
        .form(&message_form(config, number, body))
        .send()
        .await?;

    let status = response.status();
    let payload: Value = response.json().await?;

    if !status.is_success() {
        tracing::error!(status = %status, "provider rejected the message");
        return Err(Error::Provider {
            status: status.as_u16(),
            detail: payload.to_string(),
        });
    }

    tracing::info!(profile_id = target_profile_id, "whatsapp message relayed");
    Ok(RelayReceipt {
        message: "WhatsApp message sent successfully",
        provider_response: payload,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn test_config() -> RelayConfig {
        RelayConfig {
            account_sid: "AC_test".to_string(),
            auth_token: "secret".to_string(),
            from_number: "whatsapp:+14155238886".to_string(),
            // Unroutable per RFC 5737; the no-number tests never reach it
            api_url: "http://192.0.2.1/Messages.json".to_string(),
        }
    }

    #[test]
    fn test_message_form_prefixes_recipient() {
        let config = test_config();
        let form = message_form(&config, "+5511999999999", "hello");

        assert_eq!(form[0], ("To", "whatsapp:+5511999999999".to_string()));
        assert_eq!(form[1], ("From", "whatsapp:+14155238886".to_string()));
        assert_eq!(form[2], ("Body", "hello".to_string()));
    }

    #[tokio::test]
    async fn test_send_rejects_empty_body_first() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;
        let http = reqwest::Client::new();

        let result =
            send_whatsapp(&db, &http, Some(&test_config()), profile.id, profile.id, "   ").await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_send_without_connected_number_is_not_found() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;
        let http = reqwest::Client::new();

        // Test profiles have no whatsapp number; the provider is never called
        let result = send_whatsapp(
            &db,
            &http,
            Some(&test_config()),
            profile.id,
            profile.id,
            "hello",
        )
        .await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_send_to_unknown_profile_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let http = reqwest::Client::new();

        let result = send_whatsapp(&db, &http, Some(&test_config()), 999, 999, "hello").await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_send_to_another_users_profile_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let attacker = create_test_profile(&db, "attacker@example.com").await?;
        let victim = create_test_profile(&db, "victim@example.com").await?;
        crate::core::profile::connect_whatsapp(&db, victim.id, "+5511999990000").await?;
        let http = reqwest::Client::new();

        // Even with the victim onboarded and credentials present, naming
        // someone else's id resolves nothing and never reaches the provider
        let result = send_whatsapp(
            &db,
            &http,
            Some(&test_config()),
            attacker.id,
            victim.id,
            "hello",
        )
        .await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_number_outranks_missing_credentials() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;
        let http = reqwest::Client::new();

        // No number and no credentials: the 404 wins
        let result = send_whatsapp(&db, &http, None, profile.id, profile.id, "hello").await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        crate::core::profile::connect_whatsapp(&db, profile.id, "+5511999990000").await?;
        let result = send_whatsapp(&db, &http, None, profile.id, profile.id, "hello").await;
        assert!(matches!(result, Err(Error::Config { .. })));

        Ok(())
    }
}
