//! Outbound Discord operations used by the ticket lifecycle.
//!
//! Services talk to Discord only through `DiscordGateway`, taking plain `u64` ids and
//! serenity builders. `SerenityGateway` is the production implementation over the bot's
//! HTTP client; tests substitute an in-memory recorder.

#[cfg(test)]
pub mod fake;
pub mod gateway;

pub use gateway::SerenityGateway;

use serenity::{
    all::{CreateMessage, EditMessage, PermissionOverwrite},
    async_trait,
};

use crate::server::{error::AppError, model::transcript::HistoryMessage};

/// Maximum page size Discord accepts for a history fetch.
pub const HISTORY_PAGE_SIZE: u8 = 100;

/// Private text channel to create for a ticket.
#[derive(Debug, Clone)]
pub struct PrivateChannelRequest {
    pub guild_id: u64,
    pub name: String,
    /// Parent category, if any.
    pub category_id: Option<u64>,
    pub topic: Option<String>,
    pub overwrites: Vec<PermissionOverwrite>,
}

#[async_trait]
pub trait DiscordGateway: Send + Sync {
    /// Returns the id of the category named `name`, creating it if absent.
    async fn find_or_create_category(&self, guild_id: u64, name: &str) -> Result<u64, AppError>;

    /// Creates a text channel and returns its id.
    async fn create_private_channel(&self, request: PrivateChannelRequest)
        -> Result<u64, AppError>;

    /// Sends a message and returns its id.
    async fn send_message(&self, channel_id: u64, message: CreateMessage)
        -> Result<u64, AppError>;

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        message: EditMessage,
    ) -> Result<(), AppError>;

    async fn rename_channel(&self, channel_id: u64, name: &str) -> Result<(), AppError>;

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError>;

    async fn add_member_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError>;

    async fn remove_member_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError>;

    /// Fetches up to `limit` messages older than `before`, newest first.
    ///
    /// With `before` unset the page starts at the latest message.
    async fn fetch_history_page(
        &self,
        channel_id: u64,
        before: Option<u64>,
        limit: u8,
    ) -> Result<Vec<HistoryMessage>, AppError>;
}
