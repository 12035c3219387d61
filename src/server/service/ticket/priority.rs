use crate::{
    model::ticket::Priority,
    server::{
        error::{ticket::TicketError, AppError},
        model::{actor::Actor, ticket::Ticket},
    },
};

use super::{access, builder, TicketService};

impl TicketService {
    /// Changes the priority of a ticket
    ///
    /// Updates the registry and snapshot, then renames the channel, refreshes the control
    /// embed and posts a notice. Each of the Discord steps is attempted independently.
    /// The channel name follows the registry rather than this call's priority, so
    /// overlapping changes leave the name of the last one.
    ///
    /// # Returns
    /// - `Ok(Ticket)`: The ticket with its new priority
    /// - `Err(AppError::TicketErr(NotFound))`: No open ticket in this channel
    /// - `Err(AppError::TicketErr(NotAuthorized))`: Actor isn't the claimant or elevated
    pub async fn set_priority(
        &self,
        actor: &Actor,
        channel_id: u64,
        priority: Priority,
    ) -> Result<Ticket, AppError> {
        let config = self.guild_config.current();

        let ticket = self.get(channel_id).ok_or(TicketError::NotFound)?;
        access::can_set_priority(actor, &ticket, &config)?;

        let ticket = self
            .registry()
            .set_priority(channel_id, priority)
            .ok_or(TicketError::NotFound)?;

        tracing::info!(
            "Ticket {} priority set to {} by {}",
            channel_id,
            priority,
            actor.user_id
        );

        self.persist(&ticket).await;

        self.sync_channel_name(channel_id).await;

        if let Err(e) = self
            .gateway
            .edit_message(
                channel_id,
                ticket.control_message_id,
                builder::control_edit(&ticket),
            )
            .await
        {
            tracing::warn!(
                "Failed to update control message of ticket {}: {}",
                channel_id,
                e
            );
        }

        self.notify(channel_id, builder::priority_notice(actor.user_id, priority))
            .await;

        Ok(ticket)
    }

    /// Renames a ticket channel to match the priority currently in the registry.
    ///
    /// Repeats while the priority changed during the rename, so a rename that lands late
    /// is followed by one carrying the newer priority.
    async fn sync_channel_name(&self, channel_id: u64) {
        let mut applied = None;

        while let Some(ticket) = self.get(channel_id) {
            if applied == Some(ticket.priority) {
                return;
            }

            let name = builder::display_channel_name(&ticket.channel_name, ticket.priority);
            if let Err(e) = self.gateway.rename_channel(channel_id, &name).await {
                tracing::warn!("Failed to rename ticket channel {}: {}", channel_id, e);
                return;
            }

            applied = Some(ticket.priority);
        }
    }
}
