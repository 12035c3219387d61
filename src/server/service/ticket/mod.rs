//! Ticket lifecycle: open, claim, prioritise and close.
//!
//! `TicketService` owns the in-memory `TicketRegistry` and mirrors every change into the
//! SQLite snapshot so open tickets survive a restart. Each lifecycle operation lives in
//! its own submodule as an `impl TicketService` block:
//!
//! - `open` - channel creation with permission overwrites and the control message
//! - `claim` - single-claimant assignment
//! - `priority` - priority change with channel rename
//! - `close` - transcript, audit log and delayed channel deletion
//!
//! The registry lock is only ever taken for one synchronous registry call and released
//! before the next `.await`.

pub mod access;
pub mod builder;
pub mod claim;
pub mod close;
pub mod deletion;
pub mod open;
pub mod priority;
pub mod registry;

#[cfg(test)]
mod test;

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    data::{ticket::TicketRepository, ticket_cooldown::TicketCooldownRepository},
    error::AppError,
    model::ticket::Ticket,
    service::{
        discord::DiscordGateway, guild_config::GuildConfigService, transcript::TranscriptWriter,
    },
    util::parse::parse_u64_from_string,
};

use self::{deletion::DeletionScheduler, registry::TicketRegistry};

/// Timing knobs for the ticket lifecycle.
#[derive(Debug, Clone, Copy)]
pub struct TicketSettings {
    /// Minimum time between two ticket openings by the same user.
    pub cooldown: chrono::Duration,
    /// Grace delay between close and channel deletion.
    pub delete_delay: Duration,
}

impl TicketSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cooldown: chrono::Duration::seconds(config.ticket_cooldown.as_secs() as i64),
            delete_delay: config.ticket_delete_delay,
        }
    }
}

impl Default for TicketSettings {
    fn default() -> Self {
        Self {
            cooldown: chrono::Duration::seconds(60),
            delete_delay: Duration::from_secs(5),
        }
    }
}

#[derive(Clone)]
pub struct TicketService {
    db: DatabaseConnection,
    gateway: Arc<dyn DiscordGateway>,
    guild_config: GuildConfigService,
    registry: Arc<Mutex<TicketRegistry>>,
    deletions: DeletionScheduler,
    transcripts: TranscriptWriter,
    settings: TicketSettings,
}

impl TicketService {
    pub fn new(
        db: DatabaseConnection,
        gateway: Arc<dyn DiscordGateway>,
        guild_config: GuildConfigService,
        transcripts: TranscriptWriter,
        settings: TicketSettings,
    ) -> Self {
        Self {
            db,
            deletions: DeletionScheduler::new(gateway.clone()),
            gateway,
            guild_config,
            registry: Arc::new(Mutex::new(TicketRegistry::new())),
            transcripts,
            settings,
        }
    }

    /// Locks the registry. Callers must drop the guard before awaiting.
    pub(crate) fn registry(&self) -> MutexGuard<'_, TicketRegistry> {
        self.registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn deletions(&self) -> &DeletionScheduler {
        &self.deletions
    }

    pub fn guild_config(&self) -> &GuildConfigService {
        &self.guild_config
    }

    /// Open ticket for a channel, if any.
    pub fn get(&self, channel_id: u64) -> Option<Ticket> {
        self.registry().get(channel_id)
    }

    pub fn open_count(&self) -> usize {
        self.registry().len()
    }

    /// Loads open tickets and cooldowns from the snapshot into the registry.
    ///
    /// Rows that fail to convert are logged and skipped so one corrupt row doesn't keep
    /// the bot from starting.
    ///
    /// # Returns
    /// - `Ok(usize)`: Number of tickets restored
    /// - `Err(AppError::DbErr)`: Snapshot tables could not be read
    pub async fn restore(&self) -> Result<usize, AppError> {
        let rows = TicketRepository::new(&self.db).get_all().await?;
        let cooldown_rows = TicketCooldownRepository::new(&self.db).get_all().await?;

        let mut tickets = Vec::with_capacity(rows.len());
        for row in rows {
            let channel_id = row.channel_id.clone();
            match Ticket::from_entity(row) {
                Ok(ticket) => tickets.push(ticket),
                Err(e) => tracing::warn!("Skipping stored ticket {}: {}", channel_id, e),
            }
        }

        let mut cooldowns = Vec::with_capacity(cooldown_rows.len());
        for row in cooldown_rows {
            match parse_u64_from_string(row.user_id.clone()) {
                Ok(user_id) => cooldowns.push((user_id, row.last_opened_at)),
                Err(e) => tracing::warn!("Skipping stored cooldown {}: {}", row.user_id, e),
            }
        }

        let restored = tickets.len();
        self.registry().restore(tickets, cooldowns);

        tracing::info!("Restored {} open tickets", restored);

        Ok(restored)
    }

    /// Drops expired cooldowns from the registry and the snapshot.
    ///
    /// # Returns
    /// - `Ok(usize)`: Number of in-memory entries removed
    /// - `Err(AppError::DbErr)`: Snapshot cleanup failed
    pub async fn prune_cooldowns(&self) -> Result<usize, AppError> {
        let now = Utc::now();
        let pruned = self.registry().prune_cooldowns(now, self.settings.cooldown);

        TicketCooldownRepository::new(&self.db)
            .delete_older_than(now - self.settings.cooldown)
            .await?;

        Ok(pruned)
    }

    /// Writes the current state of a ticket to the snapshot, logging on failure.
    ///
    /// The registry stays authoritative; a failed write only costs durability across a
    /// restart. A ticket no longer in the registry is never written, and if it leaves
    /// while the write is in flight the row is removed again.
    async fn persist(&self, ticket: &Ticket) {
        let channel_id = ticket.channel_id;
        if self.get(channel_id).is_none() {
            tracing::debug!("Skipping snapshot of ticket {}, no longer open", channel_id);
            return;
        }

        let repo = TicketRepository::new(&self.db);
        if let Err(e) = repo.upsert(ticket).await {
            tracing::error!("Failed to persist ticket {} snapshot: {}", channel_id, e);
            return;
        }

        if self.get(channel_id).is_none() {
            if let Err(e) = repo.delete_by_channel_id(channel_id).await {
                tracing::error!("Failed to delete ticket {} snapshot: {}", channel_id, e);
            }
        }
    }

    /// Forgets a ticket whose channel was deleted outside the bot.
    ///
    /// Removes the registry entry and the snapshot row and cancels any pending deletion.
    /// Channels that never held a ticket are ignored.
    ///
    /// # Returns
    /// - `Some(Ticket)`: The ticket that was open in the channel
    /// - `None`: No open ticket in the channel
    pub async fn forget_channel(&self, channel_id: u64) -> Option<Ticket> {
        let cancelled = self.deletions.cancel(channel_id);
        let removed = self.registry().remove(channel_id);

        let Some(ticket) = removed else {
            if cancelled {
                tracing::debug!("Closed ticket channel {} deleted before its timer", channel_id);
            }
            return None;
        };

        tracing::info!(
            "Ticket channel {} of user {} was deleted, dropping the ticket",
            channel_id,
            ticket.opener_id
        );

        if let Err(e) = TicketRepository::new(&self.db)
            .delete_by_channel_id(channel_id)
            .await
        {
            tracing::error!("Failed to delete ticket {} snapshot: {}", channel_id, e);
        }

        if let Some(ticket_role_id) = self.guild_config.current().ticket_role_id {
            if let Err(e) = self
                .gateway
                .remove_member_role(
                    ticket.guild_id,
                    ticket.opener_id,
                    ticket_role_id,
                    "Ticket channel deleted",
                )
                .await
            {
                tracing::warn!(
                    "Failed to remove ticket role from user {}: {}",
                    ticket.opener_id,
                    e
                );
            }
        }

        Some(ticket)
    }
}
