//! Domain models for open tickets.

use chrono::{DateTime, Utc};

use crate::{
    model::ticket::{Department, Priority},
    server::{
        error::{internal::InternalError, AppError},
        model::actor::Actor,
        util::parse::{parse_optional_u64, parse_u64_from_string},
    },
};

/// An open support session backed by a private channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    /// Ticket channel id, unique key of the registry.
    pub channel_id: u64,
    pub guild_id: u64,
    /// Channel name at creation, without any priority prefix.
    pub channel_name: String,
    pub opener_id: u64,
    pub department: Department,
    pub priority: Option<Priority>,
    /// Message holding the Claim/Close buttons.
    pub control_message_id: u64,
    /// Staff member holding the claim. Set at most once.
    pub claimed_by: Option<u64>,
    pub start_time: DateTime<Utc>,
}

impl Ticket {
    /// Converts a snapshot row into a ticket at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - Row converted
    /// - `Err(AppError::InternalErr)` - Row holds a malformed id or unknown enum slug
    pub fn from_entity(entity: entity::ticket::Model) -> Result<Self, AppError> {
        let department = Department::from_slug(&entity.department)
            .ok_or_else(|| InternalError::UnknownDepartment(entity.department.clone()))?;

        let priority = match entity.priority {
            Some(slug) => Some(
                Priority::from_slug(&slug).ok_or(InternalError::UnknownPriority(slug))?,
            ),
            None => None,
        };

        Ok(Self {
            channel_id: parse_u64_from_string(entity.channel_id)?,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            channel_name: entity.channel_name,
            opener_id: parse_u64_from_string(entity.opener_id)?,
            department,
            priority,
            control_message_id: parse_u64_from_string(entity.control_message_id)?,
            claimed_by: parse_optional_u64(entity.claimed_by)?,
            start_time: entity.start_time,
        })
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed_by.is_some()
    }

    /// Whole minutes elapsed between creation and `now`, never negative.
    pub fn duration_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.start_time).num_seconds().max(0) / 60
    }
}

/// Parameters for opening a ticket.
#[derive(Debug, Clone)]
pub struct OpenTicketParam {
    pub guild_id: u64,
    pub opener: Actor,
    pub department: Department,
    pub priority: Option<Priority>,
}

/// Outcome of a completed close.
#[derive(Debug, Clone)]
pub struct CloseReport {
    /// Ticket as it was when removed from the registry.
    pub ticket: Ticket,
    pub closed_by: u64,
    pub duration_minutes: i64,
    /// Whether a transcript was captured.
    pub transcript_saved: bool,
    /// Whether the audit log was delivered to the log channel.
    pub logged: bool,
}
