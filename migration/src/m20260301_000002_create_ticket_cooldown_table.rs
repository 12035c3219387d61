use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketCooldown::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketCooldown::Id))
                    .col(string(TicketCooldown::UserId))
                    .col(timestamp(TicketCooldown::LastOpenedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_cooldown_user_id")
                    .table(TicketCooldown::Table)
                    .col(TicketCooldown::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_ticket_cooldown_user_id")
                    .table(TicketCooldown::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TicketCooldown::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TicketCooldown {
    Table,
    Id,
    UserId,
    LastOpenedAt,
}
