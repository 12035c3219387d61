use chrono::{DateTime, Utc};
use serenity::all::{CreateAttachment, CreateMessage};

use crate::server::{
    data::ticket::TicketRepository,
    error::AppError,
    model::{
        actor::Actor,
        guild_config::GuildConfig,
        ticket::{CloseReport, Ticket},
        transcript::Transcript,
    },
};

use super::{access, builder, TicketService};

impl TicketService {
    /// Closes a ticket
    ///
    /// Authorisation and removal from the registry happen in one step: a second close
    /// racing in, or any later interaction in the channel, sees `NotFound`. After removal
    /// nothing is fatal: transcript capture, audit logging, marker role removal and
    /// snapshot cleanup each log their own failure, and the channel is always scheduled
    /// for deletion.
    ///
    /// # Returns
    /// - `Ok(CloseReport)`: What was closed and which follow-up steps succeeded
    /// - `Err(AppError::TicketErr(NotFound))`: No open ticket in this channel
    /// - `Err(AppError::TicketErr(NotAuthorized))`: Actor may not close this ticket
    pub async fn close(&self, actor: &Actor, channel_id: u64) -> Result<CloseReport, AppError> {
        let config = self.guild_config.current();

        let ticket = self
            .registry()
            .take_if(channel_id, |ticket| access::can_close(actor, ticket, &config))?;

        let closed_at = Utc::now();
        let duration_minutes = ticket.duration_minutes(closed_at);

        tracing::info!(
            "Closing ticket {} by {} after {} min",
            channel_id,
            actor.user_id,
            duration_minutes
        );

        self.notify(
            channel_id,
            builder::closing_notice(actor.user_id, self.settings.delete_delay.as_secs()),
        )
        .await;

        let transcript = match self
            .transcripts
            .capture(channel_id, &ticket.channel_name, closed_at)
            .await
        {
            Ok(transcript) => Some(transcript),
            Err(e) => {
                tracing::warn!("Failed to capture transcript of ticket {}: {}", channel_id, e);
                None
            }
        };

        let transcript_saved = transcript.is_some();
        let logged = self
            .post_audit_log(
                &config,
                &ticket,
                actor.user_id,
                closed_at,
                duration_minutes,
                transcript,
            )
            .await;

        if let Some(ticket_role_id) = config.ticket_role_id {
            if let Err(e) = self
                .gateway
                .remove_member_role(
                    ticket.guild_id,
                    ticket.opener_id,
                    ticket_role_id,
                    "Ticket closed",
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

        if let Err(e) = TicketRepository::new(&self.db)
            .delete_by_channel_id(channel_id)
            .await
        {
            tracing::error!("Failed to delete ticket {} snapshot: {}", channel_id, e);
        }

        self.deletions
            .schedule(channel_id, self.settings.delete_delay);

        Ok(CloseReport {
            ticket,
            closed_by: actor.user_id,
            duration_minutes,
            transcript_saved,
            logged,
        })
    }

    /// Sends the audit entry for a closed ticket to the log channel.
    ///
    /// Returns whether the entry was delivered.
    async fn post_audit_log(
        &self,
        config: &GuildConfig,
        ticket: &Ticket,
        closed_by: u64,
        closed_at: DateTime<Utc>,
        duration_minutes: i64,
        transcript: Option<Transcript>,
    ) -> bool {
        let Some(log_channel_id) = config.log_channel_id else {
            tracing::warn!(
                "No log channel configured, skipping audit log for ticket {}",
                ticket.channel_id
            );
            return false;
        };

        let mut message = CreateMessage::new().embed(builder::audit_embed(
            ticket,
            closed_by,
            closed_at,
            duration_minutes,
            transcript.is_some(),
        ));
        if let Some(transcript) = transcript {
            message = message.add_file(CreateAttachment::bytes(
                transcript.content.into_bytes(),
                transcript.file_name,
            ));
        }

        match self.gateway.send_message(log_channel_id, message).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(
                    "Failed to post audit log for ticket {} to {}: {}",
                    ticket.channel_id,
                    log_channel_id,
                    e
                );
                false
            }
        }
    }
}
