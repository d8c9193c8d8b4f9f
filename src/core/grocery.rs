//! Grocery list business logic - lookup tables, items, and the estimated
//! monthly cost.
//!
//! The grocery page shows three independent collections (categories,
//! supermarkets, items); consumers fetch them side by side and join by id.
//! [`estimated_total`] is the pure reduction the page footer shows: cost of
//! everything still to buy.

use crate::{
    entities::{
        GroceryCategory, GroceryItem, Supermarket, grocery_category, grocery_item, supermarket,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};

/// Everything needed to create or rewrite a grocery item.
#[derive(Debug, Clone)]
pub struct GroceryItemInput {
    /// Product name
    pub product_name: String,
    /// How many units to buy
    pub quantity: f64,
    /// Unit of measure, if any
    pub unit: Option<String>,
    /// Estimated price per unit, if known
    pub estimated_price_per_unit: Option<f64>,
    /// Optional grocery category
    pub grocery_category_id: Option<i64>,
    /// Optional supermarket
    pub supermarket_id: Option<i64>,
}

fn validate_item(input: &GroceryItemInput) -> Result<()> {
    if input.product_name.trim().is_empty() {
        return Err(Error::Validation {
            message: "product name is required".to_string(),
        });
    }
    if input.quantity <= 0.0 || !input.quantity.is_finite() {
        return Err(Error::Validation {
            message: "quantity must be positive".to_string(),
        });
    }
    if let Some(price) = input.estimated_price_per_unit
        && (price <= 0.0 || !price.is_finite())
    {
        return Err(Error::InvalidAmount { amount: price });
    }
    Ok(())
}

/// Creates a grocery category for the caller.
pub async fn create_grocery_category(
    db: &DatabaseConnection,
    profile_id: i64,
    name: &str,
) -> Result<grocery_category::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "category name is required".to_string(),
        });
    }

    grocery_category::ActiveModel {
        profile_id: Set(profile_id),
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Lists the caller's grocery categories ordered by name.
pub async fn list_grocery_categories(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<grocery_category::Model>> {
    GroceryCategory::find()
        .filter(grocery_category::Column::ProfileId.eq(profile_id))
        .order_by_asc(grocery_category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes one of the caller's grocery categories; items keep their id
/// reference and render as uncategorized.
pub async fn delete_grocery_category(
    db: &DatabaseConnection,
    profile_id: i64,
    category_id: i64,
) -> Result<()> {
    let category = GroceryCategory::find_by_id(category_id)
        .filter(grocery_category::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "grocery category",
            id: category_id.to_string(),
        })?;
    category.delete(db).await?;
    Ok(())
}

/// Creates a supermarket for the caller.
pub async fn create_supermarket(
    db: &DatabaseConnection,
    profile_id: i64,
    name: &str,
) -> Result<supermarket::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "supermarket name is required".to_string(),
        });
    }

    supermarket::ActiveModel {
        profile_id: Set(profile_id),
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Lists the caller's supermarkets ordered by name.
pub async fn list_supermarkets(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<supermarket::Model>> {
    Supermarket::find()
        .filter(supermarket::Column::ProfileId.eq(profile_id))
        .order_by_asc(supermarket::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes one of the caller's supermarkets.
pub async fn delete_supermarket(
    db: &DatabaseConnection,
    profile_id: i64,
    supermarket_id: i64,
) -> Result<()> {
    let supermarket = Supermarket::find_by_id(supermarket_id)
        .filter(supermarket::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "supermarket",
            id: supermarket_id.to_string(),
        })?;
    supermarket.delete(db).await?;
    Ok(())
}

/// Adds an item to the caller's list, unpurchased.
pub async fn create_item(
    db: &DatabaseConnection,
    profile_id: i64,
    input: GroceryItemInput,
) -> Result<grocery_item::Model> {
    validate_item(&input)?;

    grocery_item::ActiveModel {
        profile_id: Set(profile_id),
        product_name: Set(input.product_name.trim().to_string()),
        quantity: Set(input.quantity),
        unit: Set(input.unit),
        estimated_price_per_unit: Set(input.estimated_price_per_unit),
        grocery_category_id: Set(input.grocery_category_id),
        supermarket_id: Set(input.supermarket_id),
        is_purchased: Set(false),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Lists the caller's items, newest first.
pub async fn list_items(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<grocery_item::Model>> {
    GroceryItem::find()
        .filter(grocery_item::Column::ProfileId.eq(profile_id))
        .order_by_desc(grocery_item::Column::CreatedAt)
        .order_by_desc(grocery_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds one of the caller's items by id.
pub async fn get_item(
    db: &DatabaseConnection,
    profile_id: i64,
    item_id: i64,
) -> Result<grocery_item::Model> {
    GroceryItem::find_by_id(item_id)
        .filter(grocery_item::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "grocery item",
            id: item_id.to_string(),
        })
}

/// Rewrites an item, leaving its purchased flag as-is.
pub async fn update_item(
    db: &DatabaseConnection,
    profile_id: i64,
    item_id: i64,
    input: GroceryItemInput,
) -> Result<grocery_item::Model> {
    validate_item(&input)?;

    let current = get_item(db, profile_id, item_id).await?;

    let mut active: grocery_item::ActiveModel = current.into();
    active.product_name = Set(input.product_name.trim().to_string());
    active.quantity = Set(input.quantity);
    active.unit = Set(input.unit);
    active.estimated_price_per_unit = Set(input.estimated_price_per_unit);
    active.grocery_category_id = Set(input.grocery_category_id);
    active.supermarket_id = Set(input.supermarket_id);
    active.update(db).await.map_err(Into::into)
}

/// Flips an item between purchased and pending.
pub async fn toggle_purchased(
    db: &DatabaseConnection,
    profile_id: i64,
    item_id: i64,
) -> Result<grocery_item::Model> {
    let current = get_item(db, profile_id, item_id).await?;
    let flipped = !current.is_purchased;

    let mut active: grocery_item::ActiveModel = current.into();
    active.is_purchased = Set(flipped);
    active.update(db).await.map_err(Into::into)
}

/// Removes an item from the caller's list.
pub async fn delete_item(db: &DatabaseConnection, profile_id: i64, item_id: i64) -> Result<()> {
    let item = get_item(db, profile_id, item_id).await?;
    item.delete(db).await?;
    Ok(())
}

/// Estimated cost of everything still to buy: `quantity × price` summed
/// over unpurchased items with a known price. Pure function.
#[must_use]
pub fn estimated_total(items: &[grocery_item::Model]) -> f64 {
    items
        .iter()
        .filter(|item| !item.is_purchased)
        .filter_map(|item| {
            item.estimated_price_per_unit
                .map(|price| item.quantity * price)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn item_input(name: &str, quantity: f64, price: Option<f64>) -> GroceryItemInput {
        GroceryItemInput {
            product_name: name.to_string(),
            quantity,
            unit: None,
            estimated_price_per_unit: price,
            grocery_category_id: None,
            supermarket_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_item_starts_unpurchased() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;

        let item = create_item(&db, profile.id, item_input("Rice", 2.0, Some(5.5))).await?;
        assert!(!item.is_purchased);
        assert_eq!(item.quantity, 2.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_item_validation() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;

        let result = create_item(&db, profile.id, item_input("  ", 1.0, None)).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_item(&db, profile.id, item_input("Rice", 0.0, None)).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_item(&db, profile.id, item_input("Rice", 1.0, Some(-2.0))).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_purchased_flips_both_ways() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;
        let item = create_item(&db, profile.id, item_input("Rice", 1.0, None)).await?;

        let bought = toggle_purchased(&db, profile.id, item.id).await?;
        assert!(bought.is_purchased);

        let pending = toggle_purchased(&db, profile.id, item.id).await?;
        assert!(!pending.is_purchased);

        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_tables_are_scoped_and_sorted() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_profile(&db, "alice@example.com").await?;
        let bob = create_test_profile(&db, "bob@example.com").await?;

        create_grocery_category(&db, alice.id, "Produce").await?;
        create_grocery_category(&db, alice.id, "Cleaning").await?;
        create_supermarket(&db, bob.id, "CornerShop").await?;

        let categories = list_grocery_categories(&db, alice.id).await?;
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Cleaning");

        assert!(list_supermarkets(&db, alice.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_estimated_total_counts_unpurchased_priced_items() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;

        // 2 x 5.5 = 11.0, counted
        create_item(&db, profile.id, item_input("Rice", 2.0, Some(5.5))).await?;
        // No price, skipped
        create_item(&db, profile.id, item_input("Beans", 3.0, None)).await?;
        // Purchased, skipped
        let bought = create_item(&db, profile.id, item_input("Milk", 1.0, Some(4.0))).await?;
        toggle_purchased(&db, profile.id, bought.id).await?;

        let items = list_items(&db, profile.id).await?;
        assert_eq!(estimated_total(&items), 11.0);

        Ok(())
    }

    #[test]
    fn test_estimated_total_empty_list() {
        assert_eq!(estimated_total(&[]), 0.0);
    }

    #[tokio::test]
    async fn test_delete_item_scoped_to_owner() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_profile(&db, "alice@example.com").await?;
        let bob = create_test_profile(&db, "bob@example.com").await?;
        let item = create_item(&db, alice.id, item_input("Rice", 1.0, None)).await?;

        let result = delete_item(&db, bob.id, item.id).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        delete_item(&db, alice.id, item.id).await?;
        assert!(list_items(&db, alice.id).await?.is_empty());

        Ok(())
    }
}
