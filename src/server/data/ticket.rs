use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::ticket::Ticket;

pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts or updates the snapshot row for a ticket
    ///
    /// Rows are keyed by channel id. Only the mutable fields (priority, claim and
    /// control message) are overwritten when the row already exists.
    ///
    /// # Arguments
    /// - `ticket`: Ticket as currently held in the registry
    ///
    /// # Returns
    /// - `Ok(Model)`: The stored row
    /// - `Err(DbErr)`: Database error during upsert
    pub async fn upsert(&self, ticket: &Ticket) -> Result<entity::ticket::Model, DbErr> {
        entity::prelude::Ticket::insert(entity::ticket::ActiveModel {
            channel_id: ActiveValue::Set(ticket.channel_id.to_string()),
            guild_id: ActiveValue::Set(ticket.guild_id.to_string()),
            channel_name: ActiveValue::Set(ticket.channel_name.clone()),
            opener_id: ActiveValue::Set(ticket.opener_id.to_string()),
            department: ActiveValue::Set(ticket.department.slug().to_string()),
            priority: ActiveValue::Set(ticket.priority.map(|p| p.slug().to_string())),
            control_message_id: ActiveValue::Set(ticket.control_message_id.to_string()),
            claimed_by: ActiveValue::Set(ticket.claimed_by.map(|id| id.to_string())),
            start_time: ActiveValue::Set(ticket.start_time),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::ticket::Column::ChannelId)
                .update_columns([
                    entity::ticket::Column::Priority,
                    entity::ticket::Column::ClaimedBy,
                    entity::ticket::Column::ControlMessageId,
                    entity::ticket::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await
    }

    /// Gets every stored ticket, oldest first.
    pub async fn get_all(&self) -> Result<Vec<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find()
            .order_by_asc(entity::ticket::Column::StartTime)
            .all(self.db)
            .await
    }

    /// Deletes the snapshot row for a channel
    ///
    /// # Returns
    /// - `Ok(true)`: A row was deleted
    /// - `Ok(false)`: No row existed for the channel
    /// - `Err(DbErr)`: Database error during delete
    pub async fn delete_by_channel_id(&self, channel_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::Ticket::delete_many()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
