use std::future::Future;

use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, data::guild_config::GuildConfigStore, error::AppError,
    service::guild_config::GuildConfigService,
};

/// Installs the global tracing subscriber.
///
/// Reads the filter from `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then runs all pending SeaORM migrations so the ticket snapshot tables
/// exist before the registry is restored.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Loads the guild configuration file named in the environment.
///
/// # Returns
/// - `Ok(GuildConfigService)` - Loaded configuration, all-unset if the file is missing
/// - `Err(AppError::ConfigErr)` - File exists but is unreadable or malformed
pub async fn load_guild_config(config: &Config) -> Result<GuildConfigService, AppError> {
    GuildConfigService::load(GuildConfigStore::new(&config.guild_config_path)).await
}

/// Resolves once the process is asked to stop, by Ctrl+C or by SIGTERM.
///
/// The SIGTERM listener is installed when this is called rather than on first poll, so
/// a signal arriving before the server starts is not lost. A listener that cannot be
/// installed is logged and never fires.
pub fn shutdown_signal() -> impl Future<Output = ()> {
    #[cfg(unix)]
    let terminate = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
    {
        Ok(signal) => Some(signal),
        Err(e) => {
            tracing::error!("Failed to listen for SIGTERM: {}", e);
            None
        }
    };

    async move {
        let ctrl_c = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Received Ctrl+C"),
                Err(e) => {
                    tracing::error!("Failed to listen for Ctrl+C: {}", e);
                    std::future::pending::<()>().await
                }
            }
        };

        #[cfg(unix)]
        {
            let terminate = async {
                match terminate {
                    Some(mut signal) => {
                        signal.recv().await;
                        tracing::info!("Received SIGTERM");
                    }
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                _ = ctrl_c => {}
                _ = terminate => {}
            }
        }

        #[cfg(not(unix))]
        ctrl_c.await;
    }
}
