//! Debt business logic - money owed, with manually recorded payments.
//!
//! Same shape as goals: CRUD plus an atomic increment when the user
//! records a payment.

use crate::{
    entities::{Debt, debt},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};

/// Status a debt starts in.
pub const STATUS_ACTIVE: &str = "active";

fn validate_amount(amount: f64) -> Result<()> {
    if amount <= 0.0 || !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

/// Creates a debt with nothing paid yet.
pub async fn create_debt(
    db: &DatabaseConnection,
    profile_id: i64,
    name: &str,
    total_amount: f64,
    due_date: NaiveDate,
    creditor: &str,
) -> Result<debt::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "debt name is required".to_string(),
        });
    }
    validate_amount(total_amount)?;

    debt::ActiveModel {
        profile_id: Set(profile_id),
        name: Set(name.to_string()),
        total_amount: Set(total_amount),
        paid_amount: Set(0.0),
        due_date: Set(due_date),
        creditor: Set(creditor.trim().to_string()),
        status: Set(STATUS_ACTIVE.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Lists the caller's debts ordered by due date.
pub async fn list_debts(db: &DatabaseConnection, profile_id: i64) -> Result<Vec<debt::Model>> {
    Debt::find()
        .filter(debt::Column::ProfileId.eq(profile_id))
        .order_by_asc(debt::Column::DueDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds one of the caller's debts by id.
pub async fn get_debt(
    db: &DatabaseConnection,
    profile_id: i64,
    debt_id: i64,
) -> Result<debt::Model> {
    Debt::find_by_id(debt_id)
        .filter(debt::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "debt",
            id: debt_id.to_string(),
        })
}

/// Rewrites a debt's name, total, due date, creditor, and status.
#[allow(clippy::too_many_arguments)]
pub async fn update_debt(
    db: &DatabaseConnection,
    profile_id: i64,
    debt_id: i64,
    name: &str,
    total_amount: f64,
    due_date: NaiveDate,
    creditor: &str,
    status: &str,
) -> Result<debt::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "debt name is required".to_string(),
        });
    }
    validate_amount(total_amount)?;

    let current = get_debt(db, profile_id, debt_id).await?;

    let mut active: debt::ActiveModel = current.into();
    active.name = Set(name.to_string());
    active.total_amount = Set(total_amount);
    active.due_date = Set(due_date);
    active.creditor = Set(creditor.trim().to_string());
    active.status = Set(status.to_string());
    active.update(db).await.map_err(Into::into)
}

/// Records a payment against a debt with an atomic increment.
pub async fn record_payment(
    db: &DatabaseConnection,
    profile_id: i64,
    debt_id: i64,
    amount: f64,
) -> Result<debt::Model> {
    use sea_orm::sea_query::Expr;

    validate_amount(amount)?;

    // Ownership check before the blind update
    get_debt(db, profile_id, debt_id).await?;

    Debt::update_many()
        .col_expr(
            debt::Column::PaidAmount,
            Expr::col(debt::Column::PaidAmount).add(amount),
        )
        .filter(debt::Column::Id.eq(debt_id))
        .exec(db)
        .await?;

    get_debt(db, profile_id, debt_id).await
}

/// Deletes one of the caller's debts.
pub async fn delete_debt(db: &DatabaseConnection, profile_id: i64, debt_id: i64) -> Result<()> {
    let debt = get_debt(db, profile_id, debt_id).await?;
    debt.delete(db).await?;
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
    async fn test_create_debt_starts_active_with_nothing_paid() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;

        let debt = create_debt(
            &db,
            profile.id,
            "Car loan",
            12000.0,
            date(2026, 1, 1),
            "Bank",
        )
        .await?;

        assert_eq!(debt.paid_amount, 0.0);
        assert_eq!(debt.status, STATUS_ACTIVE);
        assert_eq!(debt.creditor, "Bank");

        Ok(())
    }

    #[tokio::test]
    async fn test_record_payment_accumulates() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;
        let debt = create_debt(&db, profile.id, "Card", 500.0, date(2024, 12, 1), "Issuer")
            .await?;

        record_payment(&db, profile.id, debt.id, 100.0).await?;
        let updated = record_payment(&db, profile.id, debt.id, 150.0).await?;

        assert_eq!(updated.paid_amount, 250.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_record_payment_rejects_bad_amount() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;
        let debt = create_debt(&db, profile.id, "Card", 500.0, date(2024, 12, 1), "Issuer")
            .await?;

        let result = record_payment(&db, profile.id, debt.id, 0.0).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_debts_scoped_per_profile() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_profile(&db, "alice@example.com").await?;
        let bob = create_test_profile(&db, "bob@example.com").await?;
        let debt = create_debt(&db, alice.id, "Card", 500.0, date(2024, 12, 1), "Issuer")
            .await?;

        assert!(list_debts(&db, bob.id).await?.is_empty());
        let result = record_payment(&db, bob.id, debt.id, 10.0).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_debt() -> Result<()> {
        let (db, profile) = setup_with_profile().await?;
        let debt = create_debt(&db, profile.id, "Card", 500.0, date(2024, 12, 1), "Issuer")
            .await?;

        delete_debt(&db, profile.id, debt.id).await?;
        assert!(list_debts(&db, profile.id).await?.is_empty());

        Ok(())
    }
}
