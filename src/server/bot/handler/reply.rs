//! Reply wording and error reporting shared by the interaction handlers.

use serenity::all::{
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EditInteractionResponse, GuildId, Member,
};

use crate::server::{
    error::{ticket::TicketError, AppError},
    model::{
        actor::Actor,
        guild_config::GuildConfig,
        ticket::{CloseReport, Ticket},
    },
};

/// Actor behind an interaction, which must come from a guild member.
pub fn actor(member: Option<&Member>) -> Result<Actor, TicketError> {
    member.map(Actor::from_member).ok_or(TicketError::NotInGuild)
}

pub fn guild_id(guild_id: Option<GuildId>) -> Result<u64, TicketError> {
    guild_id.map(|id| id.get()).ok_or(TicketError::NotInGuild)
}

/// Logs a failed interaction and returns the text to show the user.
///
/// Expected ticket outcomes are logged at debug, everything else at error.
pub fn report_error(err: &AppError, operation: &str) -> String {
    if err.is_expected() {
        tracing::debug!("{} rejected: {}", operation, err);
    } else {
        tracing::error!("{} failed: {:?}", operation, err);
    }

    err.user_message()
}

pub fn ephemeral(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .ephemeral(true)
            .content(content),
    )
}

pub fn ephemeral_followup(content: impl Into<String>) -> CreateInteractionResponseFollowup {
    CreateInteractionResponseFollowup::new()
        .ephemeral(true)
        .content(content)
}

/// Final text of a deferred interaction, clearing any components of the original
/// message.
pub fn edited(content: impl Into<String>) -> EditInteractionResponse {
    EditInteractionResponse::new()
        .content(content)
        .components(Vec::new())
}

pub fn ticket_opened(ticket: &Ticket) -> String {
    format!("✅ Your ticket has been created: <#{}>", ticket.channel_id)
}

pub fn ticket_closed(report: &CloseReport) -> String {
    let mut content = format!(
        "🔒 Ticket closed after {} minute{}.",
        report.duration_minutes,
        if report.duration_minutes == 1 { "" } else { "s" }
    );
    if !report.transcript_saved {
        content.push_str(" The transcript could not be saved.");
    }
    if !report.logged {
        content.push_str(" The log channel could not be reached.");
    }
    content
}

pub fn priority_updated(ticket: &Ticket) -> String {
    match ticket.priority {
        Some(priority) => format!("Priority set to **{}**.", priority.label()),
        None => "Priority cleared.".to_string(),
    }
}

/// Summary sent after `/setup`, naming every setting left unset.
pub fn setup_summary(config: &GuildConfig) -> String {
    let unset = config.unset_settings();
    if unset.is_empty() {
        return "✅ Configuration saved. Every setting is configured.".to_string();
    }

    format!(
        "✅ Configuration saved. Not set: {}. Tickets needing these settings will be refused until they are configured.",
        unset
            .iter()
            .map(|setting| format!("`{}`", setting))
            .collect::<Vec<_>>()
            .join(", ")
    )
}
