//! Profile entity - One row per registered user.
//!
//! Holds the user's credentials, contact details, and the two independent
//! monthly limits (`monthly_budget` and `monthly_transaction_limit`).
//! `transactions_this_month` is a running tally of transaction inserts,
//! incremented atomically by the transaction module.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Unique identifier for the profile
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login email, unique across all profiles
    #[sea_orm(unique)]
    pub email: String,
    /// Bcrypt hash of the user's password, never serialized to clients
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// First name, filled in from the profile page
    pub first_name: Option<String>,
    /// Last name, filled in from the profile page
    pub last_name: Option<String>,
    /// WhatsApp number in international format; `None` until onboarding
    pub whatsapp_number: Option<String>,
    /// Cap on the number of transactions per month (independent of
    /// `monthly_budget`; neither gates anything yet)
    pub monthly_transaction_limit: Option<i32>,
    /// Count of transactions inserted this month
    pub transactions_this_month: i32,
    /// Monthly spending budget in currency units
    pub monthly_budget: Option<f64>,
    /// When the profile was created
    pub created_at: DateTimeUtc,
    /// When the profile was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Profile and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One profile has many sessions
    #[sea_orm(has_many = "super::session::Entity")]
    Sessions,
    /// One profile has many categories
    #[sea_orm(has_many = "super::category::Entity")]
    Categories,
    /// One profile has many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
