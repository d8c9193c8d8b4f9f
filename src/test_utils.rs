//! Shared test helpers: an in-memory database plus fixture rows.
//!
//! Only compiled for tests.

use crate::{
    config::database::create_tables,
    entities::{TransactionKind, category, profile, transaction},
    errors::Result,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{Database, DatabaseConnection, Set, prelude::*};

/// Creates a fresh in-memory `SQLite` database with all tables.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Inserts a profile with the given email and no connected number.
///
/// The stored password hash is a placeholder; tests that exercise login go
/// through `core::session::signup` instead.
pub async fn create_test_profile(
    db: &DatabaseConnection,
    email: &str,
) -> Result<profile::Model> {
    profile::ActiveModel {
        email: Set(email.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        transactions_this_month: Set(0),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Fresh database plus one profile, the common starting point.
pub async fn setup_with_profile() -> Result<(DatabaseConnection, profile::Model)> {
    let db = setup_test_db().await?;
    let profile = create_test_profile(&db, "user@example.com").await?;
    Ok((db, profile))
}

/// Inserts a category for the given profile.
pub async fn create_test_category(
    db: &DatabaseConnection,
    profile_id: i64,
    name: &str,
) -> Result<category::Model> {
    category::ActiveModel {
        profile_id: Set(profile_id),
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Inserts a ledger row directly, bypassing the tally bump.
pub async fn create_test_transaction(
    db: &DatabaseConnection,
    profile_id: i64,
    amount: f64,
    kind: TransactionKind,
    transaction_date: NaiveDate,
    category_id: Option<i64>,
) -> Result<transaction::Model> {
    transaction::ActiveModel {
        profile_id: Set(profile_id),
        amount: Set(amount),
        description: Set("test entry".to_string()),
        category_id: Set(category_id),
        kind: Set(kind),
        transaction_date: Set(transaction_date),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}
