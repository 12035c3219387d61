//! Channel names, permission overwrites and messages for the ticket lifecycle.

use chrono::{DateTime, Utc};
use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
    CreateMessage, EditMessage, PermissionOverwrite, PermissionOverwriteType, Permissions,
    RoleId, Timestamp, UserId,
};

use crate::{
    model::ticket::{Department, Priority},
    server::{error::AppError, model::ticket::Ticket, util::id::discord_id},
};

/// Category created for ticket channels when none is configured.
pub const TICKET_CATEGORY_NAME: &str = "Tickets";

pub const CLAIM_BUTTON_ID: &str = "ticket_claim";
pub const CLOSE_BUTTON_ID: &str = "ticket_close";

const MAX_CHANNEL_NAME_LEN: usize = 100;
const UNPRIORITIZED_COLOR: u32 = 0x5865f2;
const CLAIMED_COLOR: u32 = 0x3498db;
const CLOSED_COLOR: u32 = 0xe74c3c;

/// Lowercases `raw` and collapses everything outside `[a-z0-9]` into single dashes.
pub fn sanitize_channel_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }

    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "user".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Base channel name for a new ticket: `ticket-<department>-<username>`.
pub fn channel_name(department: Department, username: &str) -> String {
    truncate(format!(
        "ticket-{}-{}",
        department.slug(),
        sanitize_channel_segment(username)
    ))
}

/// Channel name shown for a ticket, prefixed with its priority when one is set.
pub fn display_channel_name(base: &str, priority: Option<Priority>) -> String {
    match priority {
        Some(priority) => truncate(format!("{}-{}", priority.slug(), base)),
        None => base.to_string(),
    }
}

fn truncate(mut name: String) -> String {
    if name.len() > MAX_CHANNEL_NAME_LEN {
        name.truncate(MAX_CHANNEL_NAME_LEN);
        let trimmed = name.trim_end_matches('-').len();
        name.truncate(trimmed);
    }
    name
}

/// Permission overwrites for a ticket channel.
///
/// `@everyone` loses view access, the opener and every staff role gain it, and each
/// blocked role is denied view. The opener's grant is a member overwrite, which takes
/// precedence over any role denial.
///
/// # Arguments
/// - `guild_id`: Guild id, which is also the `@everyone` role id
/// - `opener_id`: Member opening the ticket
/// - `staff_role_ids`: Department role and oversight role, when configured
/// - `blocked_role_ids`: Roles explicitly denied access
pub fn channel_overwrites(
    guild_id: u64,
    opener_id: u64,
    staff_role_ids: &[u64],
    blocked_role_ids: &[u64],
) -> Result<Vec<PermissionOverwrite>, AppError> {
    let staff_allow = Permissions::VIEW_CHANNEL
        | Permissions::SEND_MESSAGES
        | Permissions::READ_MESSAGE_HISTORY;

    let mut overwrites = vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(discord_id::<RoleId>(guild_id)?),
        },
        PermissionOverwrite {
            allow: staff_allow | Permissions::ATTACH_FILES,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(discord_id::<UserId>(opener_id)?),
        },
    ];

    for role_id in staff_role_ids {
        overwrites.push(PermissionOverwrite {
            allow: staff_allow,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Role(discord_id::<RoleId>(*role_id)?),
        });
    }

    for role_id in blocked_role_ids {
        if staff_role_ids.contains(role_id) {
            continue;
        }
        overwrites.push(PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(discord_id::<RoleId>(*role_id)?),
        });
    }

    Ok(overwrites)
}

fn embed_timestamp(at: DateTime<Utc>) -> Option<Timestamp> {
    Timestamp::from_unix_timestamp(at.timestamp()).ok()
}

/// Embed of the control message, reflecting priority and claim state.
pub fn control_embed(ticket: &Ticket) -> CreateEmbed {
    let title = match ticket.priority {
        Some(priority) => format!(
            "[{}] {} Ticket",
            priority.label().to_uppercase(),
            ticket.department.label()
        ),
        None => format!("{} Ticket", ticket.department.label()),
    };
    let color = match ticket.priority {
        Some(priority) => priority.color(),
        None if ticket.is_claimed() => CLAIMED_COLOR,
        None => UNPRIORITIZED_COLOR,
    };
    let status = match ticket.claimed_by {
        Some(staff_id) => format!("Claimed by <@{}>", staff_id),
        None => "Waiting for staff".to_string(),
    };

    let mut embed = CreateEmbed::new()
        .title(title)
        .description(format!(
            "Thanks for reaching out, <@{}>. Describe your issue and a member of the {} team will be with you shortly.",
            ticket.opener_id,
            ticket.department.label()
        ))
        .color(color)
        .field("Department", ticket.department.label(), true)
        .field(
            "Priority",
            ticket.priority.map(|p| p.label()).unwrap_or("None"),
            true,
        )
        .field("Status", status, true)
        .footer(CreateEmbedFooter::new(format!("Opened by {}", ticket.opener_id)));

    if let Some(timestamp) = embed_timestamp(ticket.start_time) {
        embed = embed.timestamp(timestamp);
    }

    embed
}

/// Claim and Close buttons; the Claim button is gone once the ticket is claimed.
pub fn control_components(ticket: &Ticket) -> Vec<CreateActionRow> {
    let mut buttons = Vec::with_capacity(2);
    if !ticket.is_claimed() {
        buttons.push(
            CreateButton::new(CLAIM_BUTTON_ID)
                .label("Claim")
                .style(ButtonStyle::Success),
        );
    }
    buttons.push(
        CreateButton::new(CLOSE_BUTTON_ID)
            .label("Close")
            .style(ButtonStyle::Danger),
    );

    vec![CreateActionRow::Buttons(buttons)]
}

/// Initial control message, pinging the opener and the department role.
pub fn control_message(ticket: &Ticket, department_role_id: u64) -> CreateMessage {
    CreateMessage::new()
        .content(format!("<@{}> <@&{}>", ticket.opener_id, department_role_id))
        .embed(control_embed(ticket))
        .components(control_components(ticket))
}

/// Edit bringing the control message in line with the ticket's current state.
pub fn control_edit(ticket: &Ticket) -> EditMessage {
    EditMessage::new()
        .embed(control_embed(ticket))
        .components(control_components(ticket))
}

pub fn claimed_notice(staff_id: u64) -> CreateMessage {
    CreateMessage::new().content(format!(
        "<@{}> has claimed this ticket and will be assisting you.",
        staff_id
    ))
}

pub fn priority_notice(actor_id: u64, priority: Priority) -> CreateMessage {
    CreateMessage::new().embed(
        CreateEmbed::new()
            .description(format!(
                "Priority set to **{}** by <@{}>.",
                priority.label(),
                actor_id
            ))
            .color(priority.color()),
    )
}

pub fn closing_notice(closer_id: u64, delay_secs: u64) -> CreateMessage {
    CreateMessage::new().embed(
        CreateEmbed::new()
            .title("Ticket Closed")
            .description(format!(
                "Closed by <@{}>. This channel will be deleted in {} seconds.",
                closer_id, delay_secs
            ))
            .color(CLOSED_COLOR),
    )
}

/// Audit log entry for a closed ticket.
pub fn audit_embed(
    ticket: &Ticket,
    closed_by: u64,
    closed_at: DateTime<Utc>,
    duration_minutes: i64,
    transcript_saved: bool,
) -> CreateEmbed {
    let claimant = match ticket.claimed_by {
        Some(staff_id) => format!("<@{}>", staff_id),
        None => "Unclaimed".to_string(),
    };

    let mut embed = CreateEmbed::new()
        .title("Ticket Closed")
        .description(format!(
            "`#{}` (<#{}>)",
            ticket.channel_name, ticket.channel_id
        ))
        .color(CLOSED_COLOR)
        .field("Opened by", format!("<@{}>", ticket.opener_id), true)
        .field("Claimed by", claimant, true)
        .field("Closed by", format!("<@{}>", closed_by), true)
        .field("Department", ticket.department.label(), true)
        .field(
            "Priority",
            ticket.priority.map(|p| p.label()).unwrap_or("None"),
            true,
        )
        .field("Duration", format!("{} min", duration_minutes), true)
        .field(
            "Transcript",
            if transcript_saved {
                "Attached"
            } else {
                "Unavailable"
            },
            true,
        );

    if let Some(timestamp) = embed_timestamp(closed_at) {
        embed = embed.timestamp(timestamp);
    }

    embed
}
