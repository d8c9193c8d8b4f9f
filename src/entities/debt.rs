//! Debt entity - Money owed to a creditor, same shape as a goal with
//! different field names.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Debt database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "debts")]
pub struct Model {
    /// Unique identifier for the debt
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning profile
    pub profile_id: i64,
    /// Debt name (e.g. "Car loan")
    pub name: String,
    /// Total amount owed
    pub total_amount: f64,
    /// Amount paid off so far
    pub paid_amount: f64,
    /// When the debt is due
    pub due_date: Date,
    /// Who the money is owed to
    pub creditor: String,
    /// Lifecycle status, `"active"` on creation
    pub status: String,
}

/// Defines relationships between Debt and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each debt belongs to one profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ProfileId",
        to = "super::profile::Column::Id"
    )]
    Profile,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
