//! Transaction entity - The core ledger row.
//!
//! Each transaction has an owning `profile_id`, a positive amount, a kind
//! (income or expense, a closed enum stored as a string), an optional
//! `category_id`, and a required `transaction_date` used for ordering and
//! monthly bucketing.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether a transaction adds to or subtracts from the month's balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(7))")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in
    #[sea_orm(string_value = "income")]
    Income,
    /// Money going out
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning profile
    pub profile_id: i64,
    /// Transaction amount, always positive; the sign is carried by `kind`
    pub amount: f64,
    /// Human-readable description of the transaction
    pub description: String,
    /// Optional category; NULL after the category is deleted
    pub category_id: Option<i64>,
    /// Income or expense
    pub kind: TransactionKind,
    /// Date the transaction happened (not the insert time)
    pub transaction_date: Date,
    /// When the row was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ProfileId",
        to = "super::profile::Column::Id"
    )]
    Profile,
    /// Each transaction may reference one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
