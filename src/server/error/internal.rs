use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// Stored or submitted department slug does not match any department.
    #[error("Unknown department '{0}'")]
    UnknownDepartment(String),

    /// Stored or submitted priority slug does not match any priority.
    #[error("Unknown priority '{0}'")]
    UnknownPriority(String),

    /// A freshly created channel id is already present in the ticket registry.
    ///
    /// Channel ids are minted by Discord, so this should never happen.
    #[error("Ticket registry already holds channel {0}")]
    DuplicateTicket(u64),

    /// Interaction custom id or command name the bot never registered.
    #[error("Unknown interaction '{0}'")]
    UnknownInteraction(String),

    /// Required command option or modal field missing from an interaction payload.
    #[error("Interaction is missing required field '{0}'")]
    MissingField(&'static str),

    /// Serenity rejected an id of zero.
    #[error("Discord id must be non-zero")]
    ZeroId,
}
