use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use crate::server::{
    data::guild_config::GuildConfigStore, error::AppError, model::guild_config::GuildConfig,
};

/// In-memory guild configuration backed by the guild config file.
///
/// Readers take a cloned snapshot with `current`, so a `/setup` running concurrently
/// never changes settings halfway through a ticket operation. Writers are serialised so
/// the file and the in-memory record always hold the same setup.
#[derive(Clone)]
pub struct GuildConfigService {
    store: Arc<GuildConfigStore>,
    current: Arc<RwLock<GuildConfig>>,
    writer: Arc<Mutex<()>>,
}

impl GuildConfigService {
    /// Loads the stored configuration, starting unconfigured if no file exists yet.
    pub async fn load(store: GuildConfigStore) -> Result<Self, AppError> {
        let config = store.load().await?;

        let unset = config.unset_settings();
        if !unset.is_empty() {
            tracing::warn!(
                "Guild config {:?} has unset settings: {}",
                store.path(),
                unset.join(", ")
            );
        }

        Ok(Self {
            store: Arc::new(store),
            current: Arc::new(RwLock::new(config)),
            writer: Arc::new(Mutex::new(())),
        })
    }

    /// Snapshot of the current configuration.
    pub fn current(&self) -> GuildConfig {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replaces the configuration wholesale and persists it before returning.
    ///
    /// The in-memory record only changes once the file write succeeded.
    pub async fn replace(&self, config: GuildConfig) -> Result<GuildConfig, AppError> {
        let _writer = self.writer.lock().await;

        self.store.save(&config).await?;

        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = config.clone();

        tracing::info!("Guild config updated");

        Ok(config)
    }
}
