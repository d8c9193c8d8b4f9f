//! Transaction business logic - the ledger's create/list/update/delete.
//!
//! Creation validates the amount, the kind, and the optional category
//! (which must belong to the caller), then inserts the row and bumps the
//! profile's `transactions_this_month` tally in the same database
//! transaction. The tally bump is an atomic `SET x = x + 1`, never a
//! read-modify-write, so concurrent submissions cannot lose updates.

use crate::{
    entities::{Category, Profile, Transaction, TransactionKind, category, profile, transaction},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*};

/// Validates a monetary amount: strictly positive and finite.
fn validate_amount(amount: f64) -> Result<()> {
    if amount <= 0.0 || !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

/// Atomically increments the profile's monthly transaction tally.
async fn increment_monthly_tally<C>(db: &C, profile_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    Profile::update_many()
        .col_expr(
            profile::Column::TransactionsThisMonth,
            Expr::col(profile::Column::TransactionsThisMonth).add(1),
        )
        .filter(profile::Column::Id.eq(profile_id))
        .exec(db)
        .await?;

    Ok(())
}

/// Creates a ledger row for the caller and bumps the monthly tally.
///
/// The optional category must exist and belong to the caller; the date is
/// the user-supplied transaction date, not the insert time.
pub async fn create_transaction(
    db: &DatabaseConnection,
    profile_id: i64,
    amount: f64,
    description: &str,
    kind: TransactionKind,
    category_id: Option<i64>,
    transaction_date: NaiveDate,
) -> Result<transaction::Model> {
    validate_amount(amount)?;

    let description = description.trim();
    if description.is_empty() {
        return Err(Error::Validation {
            message: "description is required".to_string(),
        });
    }

    let txn = db.begin().await?;

    if let Some(id) = category_id {
        Category::find_by_id(id)
            .filter(category::Column::ProfileId.eq(profile_id))
            .one(&txn)
            .await?
            .ok_or_else(|| Error::NotFound {
                entity: "category",
                id: id.to_string(),
            })?;
    }

    let model = transaction::ActiveModel {
        profile_id: Set(profile_id),
        amount: Set(amount),
        description: Set(description.to_string()),
        category_id: Set(category_id),
        kind: Set(kind),
        transaction_date: Set(transaction_date),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let created = model.insert(&txn).await?;

    increment_monthly_tally(&txn, profile_id).await?;

    txn.commit().await?;
    Ok(created)
}

/// Lists the caller's transactions, newest date first, with the category
/// joined at query time (missing categories come back as `None`).
pub async fn list_transactions(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<(transaction::Model, Option<category::Model>)>> {
    Transaction::find()
        .filter(transaction::Column::ProfileId.eq(profile_id))
        .order_by_desc(transaction::Column::TransactionDate)
        .order_by_desc(transaction::Column::Id)
        .find_also_related(Category)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds one of the caller's transactions by id.
pub async fn get_transaction(
    db: &DatabaseConnection,
    profile_id: i64,
    transaction_id: i64,
) -> Result<transaction::Model> {
    Transaction::find_by_id(transaction_id)
        .filter(transaction::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "transaction",
            id: transaction_id.to_string(),
        })
}

/// Rewrites an existing ledger row. The same validation as creation
/// applies; the monthly tally is untouched (it counts inserts).
#[allow(clippy::too_many_arguments)]
pub async fn update_transaction(
    db: &DatabaseConnection,
    profile_id: i64,
    transaction_id: i64,
    amount: f64,
    description: &str,
    kind: TransactionKind,
    category_id: Option<i64>,
    transaction_date: NaiveDate,
) -> Result<transaction::Model> {
    validate_amount(amount)?;

    let description = description.trim();
    if description.is_empty() {
        return Err(Error::Validation {
            message: "description is required".to_string(),
        });
    }

    if let Some(id) = category_id {
        Category::find_by_id(id)
            .filter(category::Column::ProfileId.eq(profile_id))
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound {
                entity: "category",
                id: id.to_string(),
            })?;
    }

    let current = get_transaction(db, profile_id, transaction_id).await?;

    let mut active: transaction::ActiveModel = current.into();
    active.amount = Set(amount);
    active.description = Set(description.to_string());
    active.kind = Set(kind);
    active.category_id = Set(category_id);
    active.transaction_date = Set(transaction_date);
    active.update(db).await.map_err(Into::into)
}

/// Deletes one of the caller's transactions.
///
/// The monthly tally is a running count of inserts and is deliberately not
/// decremented here.
pub async fn delete_transaction(
    db: &DatabaseConnection,
    profile_id: i64,
    transaction_id: i64,
) -> Result<()> {
    let transaction = get_transaction(db, profile_id, transaction_id).await?;
    transaction.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_transaction_validation() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;

        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = create_transaction(
                &db,
                profile.id,
                bad,
                "coffee",
                TransactionKind::Expense,
                None,
                date(2024, 3, 1),
            )
            .await;
            assert!(matches!(result, Err(Error::InvalidAmount { .. })));
        }

        let result = create_transaction(
            &db,
            profile.id,
            10.0,
            "   ",
            TransactionKind::Expense,
            None,
            date(2024, 3, 1),
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_transaction_increments_tally_atomically() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;
        assert_eq!(profile.transactions_this_month, 0);

        for i in 0..3 {
            create_transaction(
                &db,
                profile.id,
                10.0 + f64::from(i),
                "groceries",
                TransactionKind::Expense,
                None,
                date(2024, 3, 1),
            )
            .await?;
        }

        let reloaded = crate::core::profile::get_profile(&db, profile.id).await?;
        assert_eq!(reloaded.transactions_this_month, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_transaction_rejects_foreign_category() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_profile(&db, "alice@example.com").await?;
        let bob = create_test_profile(&db, "bob@example.com").await?;
        let bobs = create_test_category(&db, bob.id, "Rent").await?;

        let result = create_transaction(
            &db,
            alice.id,
            10.0,
            "rent",
            TransactionKind::Expense,
            Some(bobs.id),
            date(2024, 3, 1),
        )
        .await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        // Failed create must not bump the tally
        let reloaded = crate::core::profile::get_profile(&db, alice.id).await?;
        assert_eq!(reloaded.transactions_this_month, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_transactions_newest_first_with_category() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;
        let food = create_test_category(&db, profile.id, "Food").await?;

        create_test_transaction(
            &db,
            profile.id,
            10.0,
            TransactionKind::Expense,
            date(2024, 3, 1),
            Some(food.id),
        )
        .await?;
        create_test_transaction(
            &db,
            profile.id,
            20.0,
            TransactionKind::Income,
            date(2024, 3, 15),
            None,
        )
        .await?;

        let rows = list_transactions(&db, profile.id).await?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0.transaction_date, date(2024, 3, 15));
        assert!(rows[0].1.is_none());
        assert_eq!(rows[1].1.as_ref().unwrap().name, "Food");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_transaction() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;
        let created = create_test_transaction(
            &db,
            profile.id,
            10.0,
            TransactionKind::Expense,
            date(2024, 3, 1),
            None,
        )
        .await?;

        let updated = update_transaction(
            &db,
            profile.id,
            created.id,
            25.0,
            "corrected",
            TransactionKind::Income,
            None,
            date(2024, 3, 2),
        )
        .await?;

        assert_eq!(updated.amount, 25.0);
        assert_eq!(updated.description, "corrected");
        assert_eq!(updated.kind, TransactionKind::Income);
        assert_eq!(updated.transaction_date, date(2024, 3, 2));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_transaction_keeps_tally() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;
        let created = create_transaction(
            &db,
            profile.id,
            10.0,
            "groceries",
            TransactionKind::Expense,
            None,
            date(2024, 3, 1),
        )
        .await?;

        delete_transaction(&db, profile.id, created.id).await?;

        let rows = list_transactions(&db, profile.id).await?;
        assert!(rows.is_empty());

        // Running tally counts inserts, not surviving rows
        let reloaded = crate::core::profile::get_profile(&db, profile.id).await?;
        assert_eq!(reloaded.transactions_this_month, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_transaction_scoped_to_owner() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_profile(&db, "alice@example.com").await?;
        let bob = create_test_profile(&db, "bob@example.com").await?;

        let alices = create_test_transaction(
            &db,
            alice.id,
            10.0,
            TransactionKind::Expense,
            date(2024, 3, 1),
            None,
        )
        .await?;

        let result = delete_transaction(&db, bob.id, alices.id).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        Ok(())
    }
}
