use std::sync::Arc;

use chrono::{DateTime, Utc};
use serenity::{
    all::{
        ChannelId, ChannelType, CreateChannel, CreateMessage, EditChannel, EditMessage,
        GetMessages, GuildId, Message, MessageId, RoleId, UserId,
    },
    async_trait,
    http::Http,
};

use crate::server::{
    error::AppError,
    model::transcript::HistoryMessage,
    service::discord::{DiscordGateway, PrivateChannelRequest},
    util::id::discord_id as id,
};

/// `DiscordGateway` backed by the bot's HTTP client.
#[derive(Clone)]
pub struct SerenityGateway {
    http: Arc<Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

impl From<&Message> for HistoryMessage {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.get(),
            author: message.author.tag(),
            content: message.content.clone(),
            timestamp: DateTime::<Utc>::from_timestamp(message.timestamp.unix_timestamp(), 0)
                .unwrap_or_default(),
            embed_count: message.embeds.len(),
            attachments: message
                .attachments
                .iter()
                .map(|attachment| attachment.filename.clone())
                .collect(),
        }
    }
}

#[async_trait]
impl DiscordGateway for SerenityGateway {
    async fn find_or_create_category(&self, guild_id: u64, name: &str) -> Result<u64, AppError> {
        let guild_id: GuildId = id(guild_id)?;

        let channels = guild_id.channels(&self.http).await?;
        if let Some(existing) = channels.values().find(|channel| {
            channel.kind == ChannelType::Category && channel.name.eq_ignore_ascii_case(name)
        }) {
            return Ok(existing.id.get());
        }

        let category = guild_id
            .create_channel(
                &self.http,
                CreateChannel::new(name).kind(ChannelType::Category),
            )
            .await?;

        Ok(category.id.get())
    }

    async fn create_private_channel(
        &self,
        request: PrivateChannelRequest,
    ) -> Result<u64, AppError> {
        let guild_id: GuildId = id(request.guild_id)?;

        let mut builder = CreateChannel::new(request.name)
            .kind(ChannelType::Text)
            .permissions(request.overwrites);
        if let Some(category_id) = request.category_id {
            builder = builder.category(id::<ChannelId>(category_id)?);
        }
        if let Some(topic) = request.topic {
            builder = builder.topic(topic);
        }

        let channel = guild_id.create_channel(&self.http, builder).await?;

        Ok(channel.id.get())
    }

    async fn send_message(
        &self,
        channel_id: u64,
        message: CreateMessage,
    ) -> Result<u64, AppError> {
        let channel_id: ChannelId = id(channel_id)?;
        let sent = channel_id.send_message(&self.http, message).await?;

        Ok(sent.id.get())
    }

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        message: EditMessage,
    ) -> Result<(), AppError> {
        let channel_id: ChannelId = id(channel_id)?;
        let message_id: MessageId = id(message_id)?;
        channel_id
            .edit_message(&self.http, message_id, message)
            .await?;

        Ok(())
    }

    async fn rename_channel(&self, channel_id: u64, name: &str) -> Result<(), AppError> {
        let channel_id: ChannelId = id(channel_id)?;
        channel_id
            .edit(&self.http, EditChannel::new().name(name))
            .await?;

        Ok(())
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        let channel_id: ChannelId = id(channel_id)?;
        channel_id.delete(&self.http).await?;

        Ok(())
    }

    async fn add_member_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError> {
        self.http
            .add_member_role(
                id::<GuildId>(guild_id)?,
                id::<UserId>(user_id)?,
                id::<RoleId>(role_id)?,
                Some(reason),
            )
            .await?;

        Ok(())
    }

    async fn remove_member_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError> {
        self.http
            .remove_member_role(
                id::<GuildId>(guild_id)?,
                id::<UserId>(user_id)?,
                id::<RoleId>(role_id)?,
                Some(reason),
            )
            .await?;

        Ok(())
    }

    async fn fetch_history_page(
        &self,
        channel_id: u64,
        before: Option<u64>,
        limit: u8,
    ) -> Result<Vec<HistoryMessage>, AppError> {
        let channel_id: ChannelId = id(channel_id)?;

        let mut request = GetMessages::new().limit(limit);
        if let Some(before) = before {
            request = request.before(id::<MessageId>(before)?);
        }

        let messages = channel_id.messages(&self.http, request).await?;

        Ok(messages.iter().map(HistoryMessage::from).collect())
    }
}
