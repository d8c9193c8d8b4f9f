//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the
//! Rust struct definitions without hand-written SQL.

use crate::entities::{
    Category, Debt, Goal, GroceryCategory, GroceryItem, Profile, Session, Supermarket, Transaction,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the environment or falls back to a local
/// `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/fintrack.sqlite".to_string())
}

/// Establishes a connection to the database.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
///
/// Statements carry `IF NOT EXISTS`, so this runs unconditionally at every
/// startup: a fresh database gets its schema, an existing one is untouched.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = [
        schema.create_table_from_entity(Profile),
        schema.create_table_from_entity(Session),
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(Transaction),
        schema.create_table_from_entity(Goal),
        schema.create_table_from_entity(Debt),
        schema.create_table_from_entity(GroceryCategory),
        schema.create_table_from_entity(Supermarket),
        schema.create_table_from_entity(GroceryItem),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(statement)).await?;
    }

    Ok(())
}
