//! Goal business logic - savings goals with manually recorded progress.

use crate::{
    entities::{Goal, goal},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};

/// Status a goal starts in.
pub const STATUS_ACTIVE: &str = "active";

fn validate_amount(amount: f64) -> Result<()> {
    if amount <= 0.0 || !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

/// Creates a goal with zero progress.
pub async fn create_goal(
    db: &DatabaseConnection,
    profile_id: i64,
    name: &str,
    target_amount: f64,
    due_date: NaiveDate,
) -> Result<goal::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "goal name is required".to_string(),
        });
    }
    validate_amount(target_amount)?;

    goal::ActiveModel {
        profile_id: Set(profile_id),
        name: Set(name.to_string()),
        target_amount: Set(target_amount),
        current_amount: Set(0.0),
        due_date: Set(due_date),
        status: Set(STATUS_ACTIVE.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Lists the caller's goals ordered by due date.
pub async fn list_goals(db: &DatabaseConnection, profile_id: i64) -> Result<Vec<goal::Model>> {
    Goal::find()
        .filter(goal::Column::ProfileId.eq(profile_id))
        .order_by_asc(goal::Column::DueDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds one of the caller's goals by id.
pub async fn get_goal(
    db: &DatabaseConnection,
    profile_id: i64,
    goal_id: i64,
) -> Result<goal::Model> {
    Goal::find_by_id(goal_id)
        .filter(goal::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "goal",
            id: goal_id.to_string(),
        })
}

/// Rewrites a goal's name, target, due date, and status.
pub async fn update_goal(
    db: &DatabaseConnection,
    profile_id: i64,
    goal_id: i64,
    name: &str,
    target_amount: f64,
    due_date: NaiveDate,
    status: &str,
) -> Result<goal::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "goal name is required".to_string(),
        });
    }
    validate_amount(target_amount)?;

    let current = get_goal(db, profile_id, goal_id).await?;

    let mut active: goal::ActiveModel = current.into();
    active.name = Set(name.to_string());
    active.target_amount = Set(target_amount);
    active.due_date = Set(due_date);
    active.status = Set(status.to_string());
    active.update(db).await.map_err(Into::into)
}

/// Records saved money against a goal with an atomic increment.
///
/// Progress is only ever user-recorded; nothing derives it from the
/// ledger.
pub async fn add_progress(
    db: &DatabaseConnection,
    profile_id: i64,
    goal_id: i64,
    amount: f64,
) -> Result<goal::Model> {
    use sea_orm::sea_query::Expr;

    validate_amount(amount)?;

    // Ownership check before the blind update
    get_goal(db, profile_id, goal_id).await?;

    Goal::update_many()
        .col_expr(
            goal::Column::CurrentAmount,
            Expr::col(goal::Column::CurrentAmount).add(amount),
        )
        .filter(goal::Column::Id.eq(goal_id))
        .exec(db)
        .await?;

    get_goal(db, profile_id, goal_id).await
}

/// Deletes one of the caller's goals.
pub async fn delete_goal(db: &DatabaseConnection, profile_id: i64, goal_id: i64) -> Result<()> {
    let goal = get_goal(db, profile_id, goal_id).await?;
    goal.delete(db).await?;
    Ok(())
}
