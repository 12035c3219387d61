mod model;
mod server;

use std::sync::Arc;

use crate::server::{
    bot,
    config::Config,
    error::AppError,
    router,
    scheduler::cooldown_sweep,
    service::{
        discord::{DiscordGateway, SerenityGateway},
        ticket::{TicketService, TicketSettings},
        transcript::TranscriptWriter,
    },
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_logging();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let guild_config = startup::load_guild_config(&config).await?;

    let gateway: Arc<dyn DiscordGateway> =
        Arc::new(SerenityGateway::new(bot::start::discord_http(&config)));
    let transcripts = TranscriptWriter::new(gateway.clone(), &config.transcript_dir);

    let tickets = TicketService::new(
        db,
        gateway.clone(),
        guild_config,
        transcripts,
        TicketSettings::from_config(&config),
    );
    tickets.restore().await?;

    let state = AppState::new(tickets.clone(), gateway);

    // Start Discord bot in a separate task
    let bot_client = bot::start::init_bot(&config, state.clone()).await?;
    let shard_manager = bot_client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let mut scheduler = cooldown_sweep::start_scheduler(tickets.clone()).await?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Liveness endpoint listening on port {}", config.port);

    axum::serve(listener, router::router().with_state(state))
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;

    tracing::info!("Shutting down");

    let flushed = tickets.deletions().flush().await;
    if flushed > 0 {
        tracing::info!("Deleted {} closed ticket channels before exit", flushed);
    }
    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!("Failed to stop cooldown sweep: {}", e);
    }
    shard_manager.shutdown_all().await;

    Ok(())
}
