use serenity::all::{Context, EventHandler, GuildChannel, Interaction, Message, Ready};
use serenity::async_trait;

use crate::server::state::AppState;

pub mod channel;
pub mod command;
pub mod component;
pub mod modal;
pub mod ready;
pub mod reply;

/// Discord bot event handler
pub struct Handler {
    pub state: AppState,
}

impl Handler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called for every slash command, component interaction and modal submission
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => {
                command::handle_command(&self.state, &ctx, command).await
            }
            Interaction::Component(component) => {
                component::handle_component(&self.state, &ctx, component).await
            }
            Interaction::Modal(modal) => modal::handle_modal(&ctx, modal).await,
            _ => {}
        }
    }

    /// Called when a channel is deleted from a guild
    async fn channel_delete(
        &self,
        ctx: Context,
        channel: GuildChannel,
        messages: Option<Vec<Message>>,
    ) {
        channel::handle_channel_delete(&self.state.tickets, ctx, channel, messages).await;
    }
}
