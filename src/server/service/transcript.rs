//! Channel history capture for closed tickets.
//!
//! History is fetched newest-first in pages, reversed into chronological order and
//! rendered as plain text. The rendered file is kept in the transcript directory and
//! returned for attachment to the audit log.

use std::{path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};

use crate::server::{
    error::AppError,
    model::transcript::{HistoryMessage, Transcript},
    service::discord::{DiscordGateway, HISTORY_PAGE_SIZE},
};

/// Upper bound on messages included in one transcript.
pub const MAX_TRANSCRIPT_MESSAGES: usize = 5000;

#[derive(Clone)]
pub struct TranscriptWriter {
    gateway: Arc<dyn DiscordGateway>,
    dir: PathBuf,
}

impl TranscriptWriter {
    pub fn new(gateway: Arc<dyn DiscordGateway>, dir: impl Into<PathBuf>) -> Self {
        Self {
            gateway,
            dir: dir.into(),
        }
    }

    /// Fetches, renders and stores the transcript of a channel
    ///
    /// # Arguments
    /// - `channel_id`: Channel to capture
    /// - `channel_name`: Name used in the header and file name
    /// - `closed_at`: Close time, used in the file name
    ///
    /// # Returns
    /// - `Ok(Transcript)`: Rendered transcript, also written to the transcript directory
    /// - `Err(AppError)`: History fetch or file write failed
    pub async fn capture(
        &self,
        channel_id: u64,
        channel_name: &str,
        closed_at: DateTime<Utc>,
    ) -> Result<Transcript, AppError> {
        let messages = self.fetch_history(channel_id).await?;

        let transcript = Transcript {
            file_name: Self::file_name(channel_name, closed_at),
            content: Self::render(channel_name, &messages),
            message_count: messages.len(),
        };

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&transcript.file_name), &transcript.content).await?;

        Ok(transcript)
    }

    /// Fetches channel history in chronological order, capped at
    /// `MAX_TRANSCRIPT_MESSAGES` of the most recent messages.
    async fn fetch_history(&self, channel_id: u64) -> Result<Vec<HistoryMessage>, AppError> {
        let mut messages: Vec<HistoryMessage> = Vec::new();
        let mut before = None;

        loop {
            let page = self
                .gateway
                .fetch_history_page(channel_id, before, HISTORY_PAGE_SIZE)
                .await?;
            let page_len = page.len();

            let Some(oldest) = page.last() else {
                break;
            };
            before = Some(oldest.id);
            messages.extend(page);

            if messages.len() >= MAX_TRANSCRIPT_MESSAGES {
                messages.truncate(MAX_TRANSCRIPT_MESSAGES);
                break;
            }
            if page_len < HISTORY_PAGE_SIZE as usize {
                break;
            }
        }

        messages.reverse();

        Ok(messages)
    }

    /// Renders messages as plain text under a `Transcript for #name` header.
    pub fn render(channel_name: &str, messages: &[HistoryMessage]) -> String {
        let header = format!("Transcript for #{}", channel_name);
        let mut out = format!("{}\n{}\n", header, "=".repeat(header.chars().count()));

        for message in messages {
            out.push_str(&format!(
                "[{}] {}: {}",
                message.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
                message.author,
                message.content
            ));
            if message.embed_count > 0 {
                out.push_str(&format!(" [embeds: {}]", message.embed_count));
            }
            if !message.attachments.is_empty() {
                out.push_str(&format!(" [attachments: {}]", message.attachments.join(", ")));
            }
            out.push('\n');
        }

        out
    }

    pub fn file_name(channel_name: &str, closed_at: DateTime<Utc>) -> String {
        format!("transcript-{}-{}.txt", channel_name, closed_at.timestamp())
    }
}
