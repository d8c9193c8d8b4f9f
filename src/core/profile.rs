//! Profile business logic - reads and updates of the caller's own profile.
//!
//! Every function takes the authenticated profile id; there is no way to
//! address another user's row.

use crate::{
    entities::{Profile, profile},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Loads the caller's profile.
pub async fn get_profile(db: &DatabaseConnection, profile_id: i64) -> Result<profile::Model> {
    Profile::find_by_id(profile_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "profile",
            id: profile_id.to_string(),
        })
}

/// Updates the display names and bumps `updated_at`.
pub async fn update_profile(
    db: &DatabaseConnection,
    profile_id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<profile::Model> {
    let current = get_profile(db, profile_id).await?;

    let mut active: profile::ActiveModel = current.into();
    active.first_name = Set(first_name);
    active.last_name = Set(last_name);
    active.updated_at = Set(Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Sets the two independent monthly limits.
///
/// `monthly_budget` caps spending, `monthly_transaction_limit` caps the
/// transaction count; they are stored separately and neither gates any
/// operation yet.
pub async fn update_limits(
    db: &DatabaseConnection,
    profile_id: i64,
    monthly_budget: Option<f64>,
    monthly_transaction_limit: Option<i32>,
) -> Result<profile::Model> {
    if let Some(budget) = monthly_budget
        && (budget <= 0.0 || !budget.is_finite())
    {
        return Err(Error::InvalidAmount { amount: budget });
    }
    if let Some(limit) = monthly_transaction_limit
        && limit <= 0
    {
        return Err(Error::Validation {
            message: "monthly_transaction_limit must be positive".to_string(),
        });
    }

    let current = get_profile(db, profile_id).await?;

    let mut active: profile::ActiveModel = current.into();
    active.monthly_budget = Set(monthly_budget);
    active.monthly_transaction_limit = Set(monthly_transaction_limit);
    active.updated_at = Set(Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Stores the WhatsApp number, the single onboarding write. Idempotent:
/// repeating the call with the same number changes nothing observable.
pub async fn connect_whatsapp(
    db: &DatabaseConnection,
    profile_id: i64,
    number: &str,
) -> Result<profile::Model> {
    let number = number.trim();
    if number.is_empty() {
        return Err(Error::Validation {
            message: "whatsapp number is required".to_string(),
        });
    }

    let current = get_profile(db, profile_id).await?;

    let mut active: profile::ActiveModel = current.into();
    active.whatsapp_number = Set(Some(number.to_string()));
    active.updated_at = Set(Utc::now());
    active.update(db).await.map_err(Into::into)
}
