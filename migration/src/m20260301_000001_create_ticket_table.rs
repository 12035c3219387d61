use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(string(Ticket::ChannelId))
                    .col(string(Ticket::GuildId))
                    .col(string(Ticket::ChannelName))
                    .col(string(Ticket::OpenerId))
                    .col(string(Ticket::Department))
                    .col(string_null(Ticket::Priority))
                    .col(string(Ticket::ControlMessageId))
                    .col(string_null(Ticket::ClaimedBy))
                    .col(timestamp(Ticket::StartTime))
                    .col(timestamp(Ticket::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // One open ticket row per channel
        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_channel_id")
                    .table(Ticket::Table)
                    .col(Ticket::ChannelId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_opener_id")
                    .table(Ticket::Table)
                    .col(Ticket::OpenerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_ticket_opener_id")
                    .table(Ticket::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_ticket_channel_id")
                    .table(Ticket::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Ticket {
    Table,
    Id,
    ChannelId,
    GuildId,
    ChannelName,
    OpenerId,
    Department,
    Priority,
    ControlMessageId,
    ClaimedBy,
    StartTime,
    UpdatedAt,
}
