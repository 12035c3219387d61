//! Slash command schemas registered when the bot connects.

use serenity::all::{
    ChannelType, Command, CommandOptionType, CreateCommand, CreateCommandOption, Http,
    Permissions,
};

use crate::{model::ticket::Priority, server::error::AppError};

fn setup_command() -> CreateCommand {
    let role = |name: &str, description: &str| {
        CreateCommandOption::new(CommandOptionType::Role, name, description)
    };

    CreateCommand::new("setup")
        .description("Configure the ticket system")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .add_option(
            CreateCommandOption::new(CommandOptionType::Channel, "logs", "Channel for ticket logs")
                .channel_types(vec![ChannelType::Text])
                .required(true),
        )
        .add_option(role("staff", "Role handling general support tickets").required(true))
        .add_option(role("internal_affairs", "Role handling internal affairs tickets"))
        .add_option(role("management", "Role handling management tickets"))
        .add_option(role("partnership", "Role handling partnership tickets"))
        .add_option(role("oversight", "Role with access to every ticket"))
        .add_option(role("ticket_role", "Role given to members with an open ticket"))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Channel,
                "category",
                "Category new ticket channels are created in",
            )
            .channel_types(vec![ChannelType::Category]),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "blocked",
            "Roles denied access to tickets, as mentions or ids",
        ))
}

fn priority_command() -> CreateCommand {
    let level = Priority::ALL.into_iter().fold(
        CreateCommandOption::new(CommandOptionType::String, "level", "New priority level")
            .required(true),
        |option, priority| option.add_string_choice(priority.label(), priority.slug()),
    );

    CreateCommand::new("priority")
        .description("Set the priority of this ticket")
        .add_option(level)
}

fn announcement_commands() -> [CreateCommand; 2] {
    let user = || {
        CreateCommandOption::new(CommandOptionType::User, "user", "Member concerned").required(true)
    };

    [
        CreateCommand::new("promote")
            .description("Announce a promotion")
            .default_member_permissions(Permissions::MANAGE_ROLES)
            .add_option(user())
            .add_option(
                CreateCommandOption::new(CommandOptionType::Role, "rank", "New rank role")
                    .required(true),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "reason",
                "Reason for the promotion",
            )),
        CreateCommand::new("infract")
            .description("Announce an infraction")
            .default_member_permissions(Permissions::MANAGE_ROLES)
            .add_option(user())
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "punishment",
                    "Punishment issued",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "reason",
                    "Reason for the infraction",
                )
                .required(true),
            ),
    ]
}

/// Every slash command the bot handles.
pub fn commands() -> Vec<CreateCommand> {
    let mut commands = vec![
        setup_command(),
        CreateCommand::new("panel")
            .description("Post the ticket panel")
            .default_member_permissions(Permissions::MANAGE_GUILD),
        priority_command(),
        CreateCommand::new("interactive")
            .description("Post a menu with private replies"),
        CreateCommand::new("embedbuilder")
            .description("Design an embed and post it to this channel")
            .default_member_permissions(Permissions::MANAGE_MESSAGES),
    ];
    commands.extend(announcement_commands());
    commands
}

/// Replaces the bot's global commands with [`commands`].
///
/// # Returns
/// - `Ok(usize)` - Number of commands registered
/// - `Err(AppError::DiscordErr)` - Registration request failed
pub async fn register_commands(http: &Http) -> Result<usize, AppError> {
    let registered = Command::set_global_commands(http, commands()).await?;

    Ok(registered.len())
}
