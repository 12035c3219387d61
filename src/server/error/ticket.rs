use thiserror::Error;

/// Expected ticket outcomes that abort an operation before any side effect.
///
/// The `Display` text of each variant is sent to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    /// A setting the operation depends on has not been configured with `/setup`.
    #[error("The ticket system is not fully configured: `{0}` is not set. Ask an administrator to run /setup.")]
    ConfigIncomplete(&'static str),

    /// The requester already has an open ticket.
    #[error("You already have an open ticket: <#{channel_id}>")]
    DuplicateTicket { channel_id: u64 },

    /// The requester's previous ticket creation has not finished yet.
    #[error("Your ticket is already being created, hold on a moment.")]
    OpenInProgress,

    /// The requester opened a ticket too recently.
    #[error("Please wait {remaining_secs} more seconds before opening another ticket.")]
    Cooldown { remaining_secs: i64 },

    /// The actor lacks the role or ownership the operation requires.
    #[error("{0}")]
    NotAuthorized(String),

    /// No open ticket exists for the channel, including tickets already closing.
    #[error("This ticket no longer exists.")]
    NotFound,

    /// Another staff member holds the claim.
    #[error("This ticket is already claimed by <@{holder_id}>.")]
    AlreadyClaimed { holder_id: u64 },

    /// The interaction came from outside a guild.
    #[error("This can only be used inside the server.")]
    NotInGuild,
}
