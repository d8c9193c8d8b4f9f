//! Grocery item entity - A line on the monthly grocery list.
//!
//! The estimated total cost of the list is computed over unpurchased items
//! with a known `estimated_price_per_unit`; see `core::grocery`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Grocery item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "grocery_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning profile
    pub profile_id: i64,
    /// Product name
    pub product_name: String,
    /// How many units to buy
    pub quantity: f64,
    /// Unit of measure (e.g. "kg", "pack")
    pub unit: Option<String>,
    /// Estimated price per unit, if known
    pub estimated_price_per_unit: Option<f64>,
    /// Optional grocery category
    pub grocery_category_id: Option<i64>,
    /// Optional supermarket
    pub supermarket_id: Option<i64>,
    /// Whether the item has been bought this month
    pub is_purchased: bool,
    /// When the row was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between GroceryItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item may reference one grocery category
    #[sea_orm(
        belongs_to = "super::grocery_category::Entity",
        from = "Column::GroceryCategoryId",
        to = "super::grocery_category::Column::Id"
    )]
    GroceryCategory,
    /// Each item may reference one supermarket
    #[sea_orm(
        belongs_to = "super::supermarket::Entity",
        from = "Column::SupermarketId",
        to = "super::supermarket::Column::Id"
    )]
    Supermarket,
}

impl Related<super::grocery_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroceryCategory.def()
    }
}

impl Related<super::supermarket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supermarket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
