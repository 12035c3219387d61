use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::ticket::TicketService};

/// Starts the cooldown sweep
///
/// Runs every minute and drops expired ticket cooldowns from the registry and the
/// snapshot, so the cooldown table only holds users who opened a ticket recently.
///
/// # Arguments
/// - `tickets`: Ticket service owning the registry
///
/// # Returns
/// - `Ok(JobScheduler)`: Running scheduler; keep it to shut it down later
/// - `Err(AppError::SchedulerErr)`: Scheduler could not be created or started
pub async fn start_scheduler(tickets: TicketService) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let tickets = tickets.clone();

        Box::pin(async move {
            match tickets.prune_cooldowns().await {
                Ok(0) => {}
                Ok(pruned) => tracing::debug!("Pruned {} expired ticket cooldowns", pruned),
                Err(e) => tracing::error!("Error pruning ticket cooldowns: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Cooldown sweep scheduler started");

    Ok(scheduler)
}
