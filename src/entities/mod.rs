//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod debt;
pub mod goal;
pub mod grocery_category;
pub mod grocery_item;
pub mod profile;
pub mod session;
pub mod supermarket;
pub mod transaction;

// Re-export the entity types under their table names; columns and models
// are reached through the modules themselves.
pub use category::Entity as Category;
pub use debt::Entity as Debt;
pub use goal::Entity as Goal;
pub use grocery_category::Entity as GroceryCategory;
pub use grocery_item::Entity as GroceryItem;
pub use profile::Entity as Profile;
pub use session::Entity as Session;
pub use supermarket::Entity as Supermarket;
pub use transaction::{Entity as Transaction, TransactionKind};
