//! Transcript inputs and outputs.

use chrono::{DateTime, Utc};

/// One message of channel history, independent of the Discord client types.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryMessage {
    pub id: u64,
    /// Author tag as displayed in the transcript.
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Number of rich embeds attached to the message.
    pub embed_count: usize,
    /// File names of attachments. Payloads are never inlined.
    pub attachments: Vec<String>,
}

/// Rendered transcript ready to be attached to the audit log.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub file_name: String,
    pub content: String,
    /// Number of messages included.
    pub message_count: usize,
}
