use chrono::{DateTime, Utc};
use serenity::all::CreateMessage;

use crate::server::{
    data::ticket_cooldown::TicketCooldownRepository,
    error::AppError,
    model::{
        guild_config::GuildConfig,
        ticket::{OpenTicketParam, Ticket},
    },
    service::discord::PrivateChannelRequest,
};

use super::{builder, TicketService};

impl TicketService {
    /// Opens a ticket for a member
    ///
    /// Fails before any side effect when the department role is unset, the member
    /// already has an open ticket, or their cooldown is running. Otherwise creates the
    /// private channel, posts the control message and registers the ticket.
    ///
    /// # Arguments
    /// - `param`: Guild, requesting member, department and optional priority
    ///
    /// # Returns
    /// - `Ok(Ticket)`: The registered ticket
    /// - `Err(AppError::TicketErr(ConfigIncomplete))`: Department role not configured
    /// - `Err(AppError::TicketErr(DuplicateTicket))`: Member already has an open ticket
    /// - `Err(AppError::TicketErr(OpenInProgress))`: Member's previous open still running
    /// - `Err(AppError::TicketErr(Cooldown))`: Member opened a ticket too recently
    /// - `Err(AppError::DiscordErr)`: Channel or control message creation failed
    pub async fn open(&self, param: OpenTicketParam) -> Result<Ticket, AppError> {
        let config = self.guild_config.current();
        let department_role_id = config.require_department_role(param.department)?;
        let opener_id = param.opener.user_id;

        let now = Utc::now();
        self.registry()
            .begin_open(opener_id, now, self.settings.cooldown)?;

        let result = self
            .create_ticket(&param, &config, department_role_id, now)
            .await;
        if result.is_err() {
            self.registry().abort_open(opener_id);
        }

        result
    }

    async fn create_ticket(
        &self,
        param: &OpenTicketParam,
        config: &GuildConfig,
        department_role_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Ticket, AppError> {
        let category_id = match config.category_id {
            Some(category_id) => category_id,
            None => {
                self.gateway
                    .find_or_create_category(param.guild_id, builder::TICKET_CATEGORY_NAME)
                    .await?
            }
        };

        let mut staff_role_ids = vec![department_role_id];
        if let Some(oversight_role_id) = config.oversight_role_id {
            if oversight_role_id != department_role_id {
                staff_role_ids.push(oversight_role_id);
            }
        }

        let channel_name = builder::channel_name(param.department, &param.opener.name);
        let channel_id = self
            .gateway
            .create_private_channel(PrivateChannelRequest {
                guild_id: param.guild_id,
                name: builder::display_channel_name(&channel_name, param.priority),
                category_id: Some(category_id),
                topic: Some(format!(
                    "{} ticket opened by <@{}>",
                    param.department.label(),
                    param.opener.user_id
                )),
                overwrites: builder::channel_overwrites(
                    param.guild_id,
                    param.opener.user_id,
                    &staff_role_ids,
                    &config.blocked_role_ids,
                )?,
            })
            .await?;

        let mut ticket = Ticket {
            channel_id,
            guild_id: param.guild_id,
            channel_name,
            opener_id: param.opener.user_id,
            department: param.department,
            priority: param.priority,
            control_message_id: 0,
            claimed_by: None,
            start_time: now,
        };

        ticket.control_message_id = match self
            .gateway
            .send_message(
                channel_id,
                builder::control_message(&ticket, department_role_id),
            )
            .await
        {
            Ok(message_id) => message_id,
            Err(e) => {
                if let Err(delete_err) = self.gateway.delete_channel(channel_id).await {
                    tracing::warn!(
                        "Failed to remove channel {} after control message failure: {}",
                        channel_id,
                        delete_err
                    );
                }
                return Err(e);
            }
        };

        let ticket = self.registry().finish_open(ticket, now)?;

        self.persist(&ticket).await;
        if let Err(e) = TicketCooldownRepository::new(&self.db)
            .upsert(ticket.opener_id, now)
            .await
        {
            tracing::error!(
                "Failed to persist cooldown for user {}: {}",
                ticket.opener_id,
                e
            );
        }

        if let Some(ticket_role_id) = config.ticket_role_id {
            if let Err(e) = self
                .gateway
                .add_member_role(
                    ticket.guild_id,
                    ticket.opener_id,
                    ticket_role_id,
                    "Opened a ticket",
                )
                .await
            {
                tracing::warn!(
                    "Failed to add ticket role to user {}: {}",
                    ticket.opener_id,
                    e
                );
            }
        }

        tracing::info!(
            "Opened {} ticket {} for user {}",
            ticket.department,
            ticket.channel_id,
            ticket.opener_id
        );

        Ok(ticket)
    }

    /// Posts a message into an open ticket on behalf of the bot, best-effort.
    pub(super) async fn notify(&self, channel_id: u64, message: CreateMessage) {
        if let Err(e) = self.gateway.send_message(channel_id, message).await {
            tracing::warn!("Failed to post notice in ticket {}: {}", channel_id, e);
        }
    }
}
