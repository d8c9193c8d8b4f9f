//! Supermarket entity - Lookup table for where grocery items are bought.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supermarket database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supermarkets")]
pub struct Model {
    /// Unique identifier for the supermarket
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning profile
    pub profile_id: i64,
    /// Supermarket name
    pub name: String,
}

/// Defines relationships between Supermarket and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One supermarket has many items
    #[sea_orm(has_many = "super::grocery_item::Entity")]
    Items,
}

impl Related<super::grocery_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
