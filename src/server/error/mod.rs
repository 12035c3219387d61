//! Error types and user-facing reply mapping.
//!
//! `AppError` is the top-level error type returned by services, repositories and the
//! Discord gateway. Interaction handlers never let an error escape: they log it and
//! turn it into a private reply with `AppError::user_message`, mirroring how an HTTP
//! backend maps errors to status codes.

pub mod config;
pub mod internal;
pub mod ticket;

use thiserror::Error;

use crate::server::error::{config::ConfigError, internal::InternalError, ticket::TicketError};

/// Generic reply used for every failure the user cannot act on.
const GENERIC_FAILURE: &str =
    "Something went wrong while handling that. Check that the bot has the permissions it needs and try again.";

/// Top-level application error type.
///
/// Aggregates all possible error types. Domain errors (`TicketError`) carry their own
/// user-facing wording, every other variant is reported to the user generically and
/// logged with full detail.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or while reading/writing the guild config file.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Ticket policy violation or lookup miss.
    ///
    /// Reported to the user verbatim, these are expected outcomes rather than faults.
    #[error(transparent)]
    TicketErr(#[from] TicketError),

    /// Unexpected internal state indicating a possible bug.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Filesystem error writing transcripts or binding the liveness listener.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Failure encoding or decoding JSON outside of config loading.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to keep the size of every `AppError` small.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Message shown to the user who triggered the failing interaction.
    ///
    /// Ticket errors explain exactly what went wrong, everything else returns a generic
    /// message so internals are never leaked into a channel.
    pub fn user_message(&self) -> String {
        match self {
            Self::TicketErr(err) => err.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    /// Whether the error is an expected outcome that does not warrant an error log.
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::TicketErr(_))
    }
}
