use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

pub struct TicketCooldownRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketCooldownRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records the time a user last opened a ticket, replacing any previous entry.
    pub async fn upsert(
        &self,
        user_id: u64,
        opened_at: DateTime<Utc>,
    ) -> Result<entity::ticket_cooldown::Model, DbErr> {
        entity::prelude::TicketCooldown::insert(entity::ticket_cooldown::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            last_opened_at: ActiveValue::Set(opened_at),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::ticket_cooldown::Column::UserId)
                .update_column(entity::ticket_cooldown::Column::LastOpenedAt)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await
    }

    pub async fn get_all(&self) -> Result<Vec<entity::ticket_cooldown::Model>, DbErr> {
        entity::prelude::TicketCooldown::find().all(self.db).await
    }

    /// Deletes cooldown entries recorded before `cutoff`
    ///
    /// Called by the cooldown sweep so expired entries don't accumulate.
    ///
    /// # Returns
    /// - `Ok(u64)`: Number of rows deleted
    /// - `Err(DbErr)`: Database error during delete
    pub async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::TicketCooldown::delete_many()
            .filter(entity::ticket_cooldown::Column::LastOpenedAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
