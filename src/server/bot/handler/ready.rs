//! Ready event handler for bot initialization.
//!
//! Fired once the bot has connected to Discord's gateway and completed the initial
//! handshake. Slash commands are (re)registered here so the schemas always match the
//! running binary.

use serenity::all::{ActivityData, Context, Ready};

use crate::server::bot::command;

/// Handles the ready event when the bot connects to Discord.
///
/// Registration failures are logged; the bot keeps serving whatever commands Discord
/// already has on record.
///
/// # Arguments
/// - `ctx` - Discord context for setting activity status and registering commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("for new tickets")));

    match command::register_commands(&ctx.http).await {
        Ok(count) => tracing::info!("Registered {} slash commands", count),
        Err(e) => tracing::error!("Failed to register slash commands: {:?}", e),
    }
}
