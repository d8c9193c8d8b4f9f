//! Grocery category entity - Lookup table for grocery items.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Grocery category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "grocery_categories")]
pub struct Model {
    /// Unique identifier for the grocery category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning profile
    pub profile_id: i64,
    /// Category name (e.g. "Produce", "Cleaning")
    pub name: String,
}

/// Defines relationships between GroceryCategory and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One grocery category has many items
    #[sea_orm(has_many = "super::grocery_item::Entity")]
    Items,
}

impl Related<super::grocery_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
