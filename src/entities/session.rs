//! Session entity - Bearer-token sessions issued at login.
//!
//! A session is the explicit, passed-down auth object: created at login,
//! resolved on every request by the guard, deleted at logout. Expired rows
//! are treated as absent.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Session database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    /// Unique identifier for the session row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Opaque bearer token (UUID v4), unique
    #[sea_orm(unique)]
    pub token: String,
    /// Profile this session belongs to
    pub profile_id: i64,
    /// When the session was created
    pub created_at: DateTimeUtc,
    /// When the session stops being valid
    pub expires_at: DateTimeUtc,
}

/// Defines relationships between Session and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each session belongs to one profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ProfileId",
        to = "super::profile::Column::Id"
    )]
    Profile,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
