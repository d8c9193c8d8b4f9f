//! Messaging provider configuration.
//!
//! The WhatsApp relay talks to a Twilio-style message API. Credentials come
//! from the environment; a missing variable is a configuration error
//! surfaced as HTTP 500 by the relay endpoint, matching the behavior of the
//! function this replaces.

use crate::errors::{Error, Result};

/// Credentials and sender identity for the upstream messaging provider.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Provider account identifier (basic-auth username)
    pub account_sid: String,
    /// Provider auth token (basic-auth password)
    pub auth_token: String,
    /// Sender number, already channel-prefixed (e.g. `whatsapp:+14155238886`)
    pub from_number: String,
    /// Message-send endpoint; derived from the account SID unless overridden
    pub api_url: String,
}

impl RelayConfig {
    /// Loads the relay configuration from `TWILIO_ACCOUNT_SID`,
    /// `TWILIO_AUTH_TOKEN`, and `TWILIO_FROM_NUMBER`.
    ///
    /// `TWILIO_API_URL` overrides the endpoint, which keeps the provider
    /// swappable and the relay testable.
    pub fn from_env() -> Result<Self> {
        let account_sid = require_var("TWILIO_ACCOUNT_SID")?;
        let auth_token = require_var("TWILIO_AUTH_TOKEN")?;
        let from_number = require_var("TWILIO_FROM_NUMBER")?;
        let api_url = std::env::var("TWILIO_API_URL").unwrap_or_else(|_| {
            format!("https://api.twilio.com/2010-04-01/Accounts/{account_sid}/Messages.json")
        });

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
            api_url,
        })
    }
}

fn require_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Config {
        message: format!("{name} is not set"),
    })
}
