//! Goal entity - Savings goals with manual progress tracking.
//!
//! Progress (`current_amount`) only changes when the user records it;
//! nothing derives it from transactions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Goal database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    /// Unique identifier for the goal
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning profile
    pub profile_id: i64,
    /// Goal name (e.g. "Emergency fund")
    pub name: String,
    /// Amount the user wants to save
    pub target_amount: f64,
    /// Amount saved so far
    pub current_amount: f64,
    /// Target date for reaching the goal
    pub due_date: Date,
    /// Lifecycle status, `"active"` on creation
    pub status: String,
}

/// Defines relationships between Goal and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each goal belongs to one profile
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
