use crate::server::{
    error::{ticket::TicketError, AppError},
    model::{actor::Actor, ticket::Ticket},
};

use super::{access, builder, TicketService};

impl TicketService {
    /// Claims a ticket for a staff member
    ///
    /// The claim itself is a single registry step, so of several concurrent claims
    /// exactly one succeeds and the rest observe `AlreadyClaimed`.
    ///
    /// # Returns
    /// - `Ok(Ticket)`: The ticket, claimed by `actor`
    /// - `Err(AppError::TicketErr(NotFound))`: No open ticket in this channel
    /// - `Err(AppError::TicketErr(NotAuthorized))`: Actor isn't staff for the department
    /// - `Err(AppError::TicketErr(AlreadyClaimed))`: Someone else claimed it first
    pub async fn claim(&self, actor: &Actor, channel_id: u64) -> Result<Ticket, AppError> {
        let config = self.guild_config.current();

        let ticket = self.get(channel_id).ok_or(TicketError::NotFound)?;
        access::can_claim(actor, &ticket, &config)?;

        let ticket = self.registry().claim(channel_id, actor.user_id)?;

        tracing::info!("Ticket {} claimed by {}", channel_id, actor.user_id);

        self.persist(&ticket).await;

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

        self.notify(channel_id, builder::claimed_notice(actor.user_id))
            .await;

        Ok(ticket)
    }
}
