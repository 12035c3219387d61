use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// Check the `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but cannot be parsed.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar {
        /// Name of the environment variable
        name: String,
        /// Raw value that failed to parse
        value: String,
    },

    /// Guild config file exists but could not be read or written.
    #[error("Failed to access guild config file {path:?}: {source}")]
    GuildConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Guild config file contents are not a valid config record.
    #[error("Failed to parse guild config file {path:?}: {source}")]
    GuildConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
