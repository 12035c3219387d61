//! Channel event handler keeping the ticket registry in step with Discord.
//!
//! Staff can delete a ticket channel from the Discord client without going through the
//! close button. The ticket is then dropped so its opener isn't blocked by a ticket
//! that no longer has a channel.

use serenity::all::{Context, GuildChannel, Message};

use crate::server::service::ticket::TicketService;

/// Handles the channel_delete event when a channel is deleted from a guild.
///
/// # Arguments
/// - `tickets` - Ticket service holding the registry and snapshot
/// - `_ctx` - Discord context (unused, required by event handler signature)
/// - `channel` - The deleted guild channel from Discord
/// - `_messages` - Messages that were in the channel if available (unused)
pub async fn handle_channel_delete(
    tickets: &TicketService,
    _ctx: Context,
    channel: GuildChannel,
    _messages: Option<Vec<Message>>,
) {
    let channel_id = channel.id.get();

    if tickets.forget_channel(channel_id).await.is_some() {
        tracing::info!(
            "Dropped ticket for channel {} deleted from guild {}",
            channel.name,
            channel.guild_id.get()
        );
    }
}
