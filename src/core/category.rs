//! Category business logic - CRUD over the caller's transaction categories.
//!
//! Deleting a category detaches it from the caller's transactions inside a
//! single database transaction, so ledger rows never point at a missing
//! category row for this user.

use crate::{
    entities::{Category, Transaction, category, transaction},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*};

/// Creates a category for the caller after trimming and validating the name.
pub async fn create_category(
    db: &DatabaseConnection,
    profile_id: i64,
    name: &str,
) -> Result<category::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "category name is required".to_string(),
        });
    }

    category::ActiveModel {
        profile_id: Set(profile_id),
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Lists the caller's categories ordered alphabetically by name.
pub async fn list_categories(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<category::Model>> {
    Category::find()
        .filter(category::Column::ProfileId.eq(profile_id))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds one of the caller's categories by id.
pub async fn get_category(
    db: &DatabaseConnection,
    profile_id: i64,
    category_id: i64,
) -> Result<category::Model> {
    Category::find_by_id(category_id)
        .filter(category::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "category",
            id: category_id.to_string(),
        })
}

/// Renames one of the caller's categories.
pub async fn update_category(
    db: &DatabaseConnection,
    profile_id: i64,
    category_id: i64,
    name: &str,
) -> Result<category::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "category name is required".to_string(),
        });
    }

    let current = get_category(db, profile_id, category_id).await?;

    let mut active: category::ActiveModel = current.into();
    active.name = Set(name.to_string());
    active.update(db).await.map_err(Into::into)
}

/// Deletes a category and detaches it from the caller's transactions.
///
/// Both writes happen in one database transaction; affected ledger rows
/// become uncategorized rather than dangling.
pub async fn delete_category(
    db: &DatabaseConnection,
    profile_id: i64,
    category_id: i64,
) -> Result<()> {
    use sea_orm::sea_query::Expr;

    let category = get_category(db, profile_id, category_id).await?;

    let txn = db.begin().await?;

    Transaction::update_many()
        .col_expr(transaction::Column::CategoryId, Expr::value(Option::<i64>::None))
        .filter(transaction::Column::ProfileId.eq(profile_id))
        .filter(transaction::Column::CategoryId.eq(category_id))
        .exec(&txn)
        .await?;

    category.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::TransactionKind;
    use crate::test_utils::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_create_and_list_categories_sorted() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;

        create_test_category(&db, profile.id, "Transport").await?;
        create_test_category(&db, profile.id, "Food").await?;

        let categories = list_categories(&db, profile.id).await?;
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Food");
        assert_eq!(categories[1].name, "Transport");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_trims_and_rejects_empty() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;

        let created = create_category(&db, profile.id, "  Food  ").await?;
        assert_eq!(created.name, "Food");

        let result = create_category(&db, profile.id, "   ").await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_categories_are_scoped_per_profile() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_profile(&db, "alice@example.com").await?;
        let bob = create_test_profile(&db, "bob@example.com").await?;

        let alices = create_test_category(&db, alice.id, "Food").await?;
        create_test_category(&db, bob.id, "Rent").await?;

        let categories = list_categories(&db, alice.id).await?;
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Food");

        // Bob cannot touch Alice's category
        let result = get_category(&db, bob.id, alices.id).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_category_renames() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;
        let category = create_test_category(&db, profile.id, "Fod").await?;

        let updated = update_category(&db, profile.id, category.id, "Food").await?;
        assert_eq!(updated.name, "Food");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_detaches_transactions() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;
        let category = create_test_category(&db, profile.id, "Food").await?;

        let txn_row = create_test_transaction(
            &db,
            profile.id,
            40.0,
            TransactionKind::Expense,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            Some(category.id),
        )
        .await?;

        delete_category(&db, profile.id, category.id).await?;

        let reloaded = Transaction::find_by_id(txn_row.id).one(&db).await?.unwrap();
        assert_eq!(reloaded.category_id, None);

        let categories = list_categories(&db, profile.id).await?;
        assert!(categories.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_not_found() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;

        let result = delete_category(&db, profile.id, 999).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        Ok(())
    }
}
