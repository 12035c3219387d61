//! Interaction payload decoding.
//!
//! Slash commands, component custom ids and modal submissions are decoded once into
//! the enums below so the handlers dispatch on typed values instead of strings.

use std::collections::HashMap;

use serenity::all::{CommandDataOption, CommandDataOptionValue};

use crate::{
    model::ticket::{Department, Priority},
    server::{error::internal::InternalError, model::guild_config::GuildConfig},
};

pub use crate::server::service::ticket::builder::{CLAIM_BUTTON_ID, CLOSE_BUTTON_ID};

pub const TICKET_DEPARTMENT_MENU_ID: &str = "ticket_department";
pub const TICKET_PRIORITY_MENU_PREFIX: &str = "ticket_priority:";
pub const PRIVATE_MESSAGE_BUTTON_ID: &str = "private_message";
pub const BOT_INFO_BUTTON_ID: &str = "bot_info";
pub const PRIVATE_MENU_ID: &str = "private_menu";
pub const EMBED_EDIT_BUTTON_ID: &str = "embed_edit";
pub const EMBED_FINISH_BUTTON_ID: &str = "embed_finish";
pub const EMBED_MODAL_ID: &str = "embed_modal";
pub const EMBED_TITLE_INPUT_ID: &str = "title";
pub const EMBED_DESCRIPTION_INPUT_ID: &str = "desc";

/// Select value standing for "open without a priority".
pub const NO_PRIORITY_VALUE: &str = "none";

/// Entries of the `/interactive` select menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateTopic {
    Rules,
    Staff,
}

impl PrivateTopic {
    pub const ALL: [PrivateTopic; 2] = [PrivateTopic::Rules, PrivateTopic::Staff];

    pub fn value(&self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::Staff => "staff",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rules => "Rules",
            Self::Staff => "Staff",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.value() == value)
    }
}

/// Options of a slash command invocation, keyed by option name.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    values: HashMap<String, CommandDataOptionValue>,
}

impl CommandOptions {
    pub fn new(options: &[CommandDataOption]) -> Self {
        Self::from_values(
            options
                .iter()
                .map(|option| (option.name.clone(), option.value.clone())),
        )
    }

    pub fn from_values<N: Into<String>>(
        values: impl IntoIterator<Item = (N, CommandDataOptionValue)>,
    ) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Id carried by a channel, role, user or mentionable option.
    pub fn id(&self, name: &str) -> Option<u64> {
        match self.values.get(name)? {
            CommandDataOptionValue::Channel(id) => Some(id.get()),
            CommandDataOptionValue::Role(id) => Some(id.get()),
            CommandDataOptionValue::User(id) => Some(id.get()),
            CommandDataOptionValue::Mentionable(id) => Some(id.get()),
            _ => None,
        }
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            CommandDataOptionValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    fn require_id(&self, name: &'static str) -> Result<u64, InternalError> {
        self.id(name).ok_or(InternalError::MissingField(name))
    }

    fn require_string(&self, name: &'static str) -> Result<String, InternalError> {
        self.string(name)
            .map(str::to_string)
            .ok_or(InternalError::MissingField(name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlashCommand {
    Setup(GuildConfig),
    Panel,
    Priority(Priority),
    Interactive,
    EmbedBuilder,
    Promote {
        user_id: u64,
        rank_role_id: u64,
        reason: Option<String>,
    },
    Infract {
        user_id: u64,
        punishment: String,
        reason: String,
    },
}

impl SlashCommand {
    pub fn decode(name: &str, options: &CommandOptions) -> Result<Self, InternalError> {
        let command = match name {
            "setup" => Self::Setup(GuildConfig {
                log_channel_id: Some(options.require_id("logs")?),
                staff_role_id: Some(options.require_id("staff")?),
                internal_affairs_role_id: options.id("internal_affairs"),
                management_role_id: options.id("management"),
                partnership_role_id: options.id("partnership"),
                oversight_role_id: options.id("oversight"),
                ticket_role_id: options.id("ticket_role"),
                category_id: options.id("category"),
                blocked_role_ids: options
                    .string("blocked")
                    .map(parse_id_list)
                    .unwrap_or_default(),
            }),
            "panel" => Self::Panel,
            "priority" => {
                let level = options.require_string("level")?;
                let priority = Priority::from_slug(&level)
                    .ok_or_else(|| InternalError::UnknownPriority(level.clone()))?;
                Self::Priority(priority)
            }
            "interactive" => Self::Interactive,
            "embedbuilder" => Self::EmbedBuilder,
            "promote" => Self::Promote {
                user_id: options.require_id("user")?,
                rank_role_id: options.require_id("rank")?,
                reason: options
                    .string("reason")
                    .map(str::trim)
                    .filter(|reason| !reason.is_empty())
                    .map(str::to_string),
            },
            "infract" => Self::Infract {
                user_id: options.require_id("user")?,
                punishment: options.require_string("punishment")?,
                reason: options.require_string("reason")?,
            },
            other => return Err(InternalError::UnknownInteraction(other.to_string())),
        };

        Ok(command)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComponentAction {
    SelectDepartment(Department),
    SelectPriority {
        department: Department,
        priority: Option<Priority>,
    },
    Claim,
    Close,
    PrivateMessage,
    BotInfo,
    PrivateMenu(PrivateTopic),
    EditEmbed,
    FinishEmbed,
}

impl ComponentAction {
    /// Decodes a component press or selection.
    ///
    /// `values` holds the selected values of a string select menu and is empty for
    /// buttons.
    pub fn decode(custom_id: &str, values: &[String]) -> Result<Self, InternalError> {
        if let Some(slug) = custom_id.strip_prefix(TICKET_PRIORITY_MENU_PREFIX) {
            let department = Department::from_slug(slug)
                .ok_or_else(|| InternalError::UnknownDepartment(slug.to_string()))?;
            let value = first_value(values)?;
            let priority = match value {
                NO_PRIORITY_VALUE => None,
                slug => Some(
                    Priority::from_slug(slug)
                        .ok_or_else(|| InternalError::UnknownPriority(slug.to_string()))?,
                ),
            };

            return Ok(Self::SelectPriority {
                department,
                priority,
            });
        }

        let action = match custom_id {
            TICKET_DEPARTMENT_MENU_ID => {
                let slug = first_value(values)?;
                Self::SelectDepartment(
                    Department::from_slug(slug)
                        .ok_or_else(|| InternalError::UnknownDepartment(slug.to_string()))?,
                )
            }
            CLAIM_BUTTON_ID => Self::Claim,
            CLOSE_BUTTON_ID => Self::Close,
            PRIVATE_MESSAGE_BUTTON_ID => Self::PrivateMessage,
            BOT_INFO_BUTTON_ID => Self::BotInfo,
            PRIVATE_MENU_ID => {
                let value = first_value(values)?;
                Self::PrivateMenu(
                    PrivateTopic::from_value(value)
                        .ok_or_else(|| InternalError::UnknownInteraction(value.to_string()))?,
                )
            }
            EMBED_EDIT_BUTTON_ID => Self::EditEmbed,
            EMBED_FINISH_BUTTON_ID => Self::FinishEmbed,
            other => return Err(InternalError::UnknownInteraction(other.to_string())),
        };

        Ok(action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    DesignEmbed { title: String, description: String },
}

impl ModalAction {
    /// Decodes a modal submission from its custom id and text input values.
    pub fn decode(
        custom_id: &str,
        fields: &HashMap<String, String>,
    ) -> Result<Self, InternalError> {
        match custom_id {
            EMBED_MODAL_ID => Ok(Self::DesignEmbed {
                title: fields
                    .get(EMBED_TITLE_INPUT_ID)
                    .cloned()
                    .ok_or(InternalError::MissingField(EMBED_TITLE_INPUT_ID))?,
                description: fields
                    .get(EMBED_DESCRIPTION_INPUT_ID)
                    .cloned()
                    .ok_or(InternalError::MissingField(EMBED_DESCRIPTION_INPUT_ID))?,
            }),
            other => Err(InternalError::UnknownInteraction(other.to_string())),
        }
    }
}

fn first_value(values: &[String]) -> Result<&str, InternalError> {
    values
        .first()
        .map(String::as_str)
        .ok_or(InternalError::MissingField("values"))
}

/// Extracts every id from a free-form list of role mentions or raw ids.
///
/// `"<@&70> <@&71>, 72"` yields `[70, 71, 72]`.
pub fn parse_id_list(input: &str) -> Vec<u64> {
    input
        .split(|c: char| !c.is_ascii_digit())
        .filter_map(|digits| digits.parse::<u64>().ok())
        .filter(|id| *id != 0)
        .collect()
}
