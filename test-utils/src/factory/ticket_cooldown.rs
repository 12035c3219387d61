//! Cooldown factory for creating per-user ticket cooldown rows.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a cooldown row recording when `user_id` last opened a ticket.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Discord user id as a string
/// - `last_opened_at` - Time the user last opened a ticket
///
/// # Returns
/// - `Ok(Model)` - The created cooldown row
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_cooldown(
    db: &DatabaseConnection,
    user_id: impl Into<String>,
    last_opened_at: DateTime<Utc>,
) -> Result<entity::ticket_cooldown::Model, DbErr> {
    entity::ticket_cooldown::ActiveModel {
        id: ActiveValue::NotSet,
        user_id: ActiveValue::Set(user_id.into()),
        last_opened_at: ActiveValue::Set(last_opened_at),
    }
    .insert(db)
    .await
}
