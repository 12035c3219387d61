use std::path::{Path, PathBuf};

use crate::server::{error::config::ConfigError, model::guild_config::GuildConfig};

/// JSON file holding the single guild configuration record.
pub struct GuildConfigStore {
    path: PathBuf,
}

impl GuildConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored configuration
    ///
    /// # Returns
    /// - `Ok(GuildConfig)`: Stored record, or an all-unset record if the file doesn't exist
    /// - `Err(ConfigError::GuildConfigIo)`: File exists but could not be read
    /// - `Err(ConfigError::GuildConfigParse)`: File contents are not a config record
    pub async fn load(&self) -> Result<GuildConfig, ConfigError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(GuildConfig::default())
            }
            Err(source) => {
                return Err(ConfigError::GuildConfigIo {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| ConfigError::GuildConfigParse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrites the stored configuration with `config`
    ///
    /// Writes to a sibling temporary file first and renames it into place, so a crash
    /// mid-write never leaves a truncated record behind.
    pub async fn save(&self, config: &GuildConfig) -> Result<(), ConfigError> {
        let json =
            serde_json::to_string_pretty(config).map_err(|source| ConfigError::GuildConfigParse {
                path: self.path.clone(),
                source,
            })?;

        let io_err = |source| ConfigError::GuildConfigIo {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await.map_err(io_err)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(io_err)?;

        Ok(())
    }
}
