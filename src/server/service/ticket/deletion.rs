//! Delayed, cancellable deletion of closed ticket channels.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use tokio::task::JoinHandle;

use crate::server::service::discord::DiscordGateway;

/// Tracks one pending deletion task per channel.
///
/// Deletion failures are logged and never retried; the ticket has already left the
/// registry by the time a deletion is scheduled.
#[derive(Clone)]
pub struct DeletionScheduler {
    gateway: Arc<dyn DiscordGateway>,
    pending: Arc<Mutex<HashMap<u64, JoinHandle<()>>>>,
}

impl DeletionScheduler {
    pub fn new(gateway: Arc<dyn DiscordGateway>) -> Self {
        Self {
            gateway,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn pending(&self) -> MutexGuard<'_, HashMap<u64, JoinHandle<()>>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Deletes `channel_id` after `delay`, replacing any deletion already pending for it.
    pub fn schedule(&self, channel_id: u64, delay: Duration) {
        let gateway = self.gateway.clone();
        let pending = self.pending.clone();

        // Held until the handle is stored, so the task cannot deregister itself first.
        let mut tasks = self.pending();
        if let Some(previous) = tasks.remove(&channel_id) {
            previous.abort();
        }

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            pending
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .remove(&channel_id);

            match gateway.delete_channel(channel_id).await {
                Ok(()) => tracing::info!("Deleted ticket channel {}", channel_id),
                Err(e) => tracing::warn!("Failed to delete ticket channel {}: {}", channel_id, e),
            }
        });

        tasks.insert(channel_id, handle);
        tracing::debug!(
            "Scheduled deletion of channel {} in {}s",
            channel_id,
            delay.as_secs()
        );
    }

    /// Cancels a pending deletion. Returns whether one was pending.
    pub fn cancel(&self, channel_id: u64) -> bool {
        match self.pending().remove(&channel_id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Aborts every pending timer and deletes those channels immediately.
    ///
    /// Returns the number of channels deleted.
    pub async fn flush(&self) -> usize {
        let drained: Vec<(u64, JoinHandle<()>)> = self.pending().drain().collect();

        let mut deleted = 0;
        for (channel_id, handle) in drained {
            handle.abort();

            match self.gateway.delete_channel(channel_id).await {
                Ok(()) => deleted += 1,
                Err(e) => tracing::warn!(
                    "Failed to delete ticket channel {} during flush: {}",
                    channel_id,
                    e
                ),
            }
        }

        deleted
    }

    pub fn pending_count(&self) -> usize {
        self.pending().len()
    }
}
