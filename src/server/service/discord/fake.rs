//! In-memory `DiscordGateway` that records every outbound call.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use serde_json::Value;
use tokio::sync::Notify;
use serenity::{
    all::{CreateMessage, EditMessage},
    async_trait,
};

use crate::server::{
    error::AppError,
    model::transcript::HistoryMessage,
    service::discord::{DiscordGateway, PrivateChannelRequest},
};

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailOn {
    CreateChannel,
    SendMessage,
    EditMessage,
    RenameChannel,
    DeleteChannel,
    MemberRole,
    FetchHistory,
}

/// Pauses one `rename_channel` call until released.
///
/// `reached` fires once the call is waiting; the rename is recorded after `release`.
#[derive(Clone, Default)]
pub struct RenameHold {
    pub reached: Arc<Notify>,
    pub release: Arc<Notify>,
}

/// A recorded outbound call. Message builders are kept as their JSON payload.
#[derive(Debug, Clone)]
pub enum GatewayCall {
    FindOrCreateCategory { guild_id: u64, name: String },
    CreateChannel { channel_id: u64, request: PrivateChannelRequest },
    SendMessage { channel_id: u64, message_id: u64, payload: Value },
    EditMessage { channel_id: u64, message_id: u64, payload: Value },
    RenameChannel { channel_id: u64, name: String },
    DeleteChannel { channel_id: u64 },
    AddMemberRole { user_id: u64, role_id: u64 },
    RemoveMemberRole { user_id: u64, role_id: u64 },
    FetchHistory { channel_id: u64, before: Option<u64> },
}

pub struct FakeGateway {
    calls: Mutex<Vec<GatewayCall>>,
    next_id: AtomicU64,
    failures: Mutex<HashSet<FailOn>>,
    /// Channel history, oldest first.
    history: Mutex<HashMap<u64, Vec<HistoryMessage>>>,
    rename_hold: Mutex<Option<RenameHold>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(10_000),
            failures: Mutex::new(HashSet::new()),
            history: Mutex::new(HashMap::new()),
            rename_hold: Mutex::new(None),
        }
    }

    /// Holds the next channel rename until the returned hold is released.
    pub fn hold_next_rename(&self) -> RenameHold {
        let hold = RenameHold::default();
        *self.rename_hold.lock().unwrap() = Some(hold.clone());
        hold
    }

    pub fn fail_on(&self, op: FailOn) {
        self.failures.lock().unwrap().insert(op);
    }

    pub fn set_history(&self, channel_id: u64, messages: Vec<HistoryMessage>) {
        self.history.lock().unwrap().insert(channel_id, messages);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_channels(&self) -> Vec<(u64, PrivateChannelRequest)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::CreateChannel {
                    channel_id,
                    request,
                } => Some((channel_id, request)),
                _ => None,
            })
            .collect()
    }

    /// JSON payloads of messages sent to a channel, in send order.
    pub fn sent_to(&self, channel_id: u64) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::SendMessage {
                    channel_id: target,
                    payload,
                    ..
                } if target == channel_id => Some(payload),
                _ => None,
            })
            .collect()
    }

    /// JSON payloads of edits made to messages in a channel.
    pub fn edits_in(&self, channel_id: u64) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::EditMessage {
                    channel_id: target,
                    payload,
                    ..
                } if target == channel_id => Some(payload),
                _ => None,
            })
            .collect()
    }

    pub fn deleted_channels(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::DeleteChannel { channel_id } => Some(channel_id),
                _ => None,
            })
            .collect()
    }

    pub fn renamed(&self, channel_id: u64) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::RenameChannel {
                    channel_id: target,
                    name,
                } if target == channel_id => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn history_fetches(&self, channel_id: u64) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(call, GatewayCall::FetchHistory { channel_id: target, .. } if *target == channel_id)
            })
            .count()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, op: FailOn) -> Result<(), AppError> {
        if self.failures.lock().unwrap().contains(&op) {
            return Err(AppError::IoErr(std::io::Error::other(format!(
                "simulated {:?} failure",
                op
            ))));
        }
        Ok(())
    }

    fn mint_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DiscordGateway for FakeGateway {
    async fn find_or_create_category(&self, guild_id: u64, name: &str) -> Result<u64, AppError> {
        self.record(GatewayCall::FindOrCreateCategory {
            guild_id,
            name: name.to_string(),
        });
        Ok(500)
    }

    async fn create_private_channel(
        &self,
        request: PrivateChannelRequest,
    ) -> Result<u64, AppError> {
        self.check(FailOn::CreateChannel)?;
        let channel_id = self.mint_id();
        self.record(GatewayCall::CreateChannel {
            channel_id,
            request,
        });
        Ok(channel_id)
    }

    async fn send_message(
        &self,
        channel_id: u64,
        message: CreateMessage,
    ) -> Result<u64, AppError> {
        self.check(FailOn::SendMessage)?;
        let message_id = self.mint_id();
        self.record(GatewayCall::SendMessage {
            channel_id,
            message_id,
            payload: serde_json::to_value(&message)?,
        });
        Ok(message_id)
    }

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        message: EditMessage,
    ) -> Result<(), AppError> {
        self.check(FailOn::EditMessage)?;
        self.record(GatewayCall::EditMessage {
            channel_id,
            message_id,
            payload: serde_json::to_value(&message)?,
        });
        Ok(())
    }

    async fn rename_channel(&self, channel_id: u64, name: &str) -> Result<(), AppError> {
        self.check(FailOn::RenameChannel)?;

        let hold = self.rename_hold.lock().unwrap().take();
        if let Some(hold) = hold {
            hold.reached.notify_one();
            hold.release.notified().await;
        }

        self.record(GatewayCall::RenameChannel {
            channel_id,
            name: name.to_string(),
        });
        Ok(())
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        self.check(FailOn::DeleteChannel)?;
        self.record(GatewayCall::DeleteChannel { channel_id });
        Ok(())
    }

    async fn add_member_role(
        &self,
        _guild_id: u64,
        user_id: u64,
        role_id: u64,
        _reason: &str,
    ) -> Result<(), AppError> {
        self.check(FailOn::MemberRole)?;
        self.record(GatewayCall::AddMemberRole { user_id, role_id });
        Ok(())
    }

    async fn remove_member_role(
        &self,
        _guild_id: u64,
        user_id: u64,
        role_id: u64,
        _reason: &str,
    ) -> Result<(), AppError> {
        self.check(FailOn::MemberRole)?;
        self.record(GatewayCall::RemoveMemberRole { user_id, role_id });
        Ok(())
    }

    async fn fetch_history_page(
        &self,
        channel_id: u64,
        before: Option<u64>,
        limit: u8,
    ) -> Result<Vec<HistoryMessage>, AppError> {
        self.check(FailOn::FetchHistory)?;
        self.record(GatewayCall::FetchHistory { channel_id, before });

        let history = self.history.lock().unwrap();
        let page = history
            .get(&channel_id)
            .map(|messages| {
                messages
                    .iter()
                    .rev()
                    .filter(|m| before.is_none_or(|before| m.id < before))
                    .take(limit as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(page)
    }
}
