//! Panels, prompts and canned replies posted by slash commands and components.

use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateInputText,
    CreateInteractionResponseMessage, CreateModal, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption, InputTextStyle,
};

use crate::{
    model::ticket::{Department, Priority},
    server::bot::action::{
        PrivateTopic, BOT_INFO_BUTTON_ID, EMBED_DESCRIPTION_INPUT_ID, EMBED_EDIT_BUTTON_ID,
        EMBED_FINISH_BUTTON_ID, EMBED_MODAL_ID, EMBED_TITLE_INPUT_ID, NO_PRIORITY_VALUE,
        PRIVATE_MENU_ID, PRIVATE_MESSAGE_BUTTON_ID, TICKET_DEPARTMENT_MENU_ID,
        TICKET_PRIORITY_MENU_PREFIX,
    },
};

pub const PANEL_COLOR: u32 = 0xde8ef4;

const EMBED_TITLE_MAX_LEN: u16 = 256;
const EMBED_DESCRIPTION_MAX_LEN: u16 = 4000;

pub const SECRET_MESSAGE: &str = "🤫 This is a private message! No one else can see this.";
pub const EMBED_POSTED: &str = "✅ Embed Posted!";

/// Public ticket panel with the department select menu.
pub fn ticket_panel() -> CreateInteractionResponseMessage {
    let options = Department::ALL
        .into_iter()
        .map(|department| {
            CreateSelectMenuOption::new(department.label(), department.slug())
                .description(department.description())
        })
        .collect();

    CreateInteractionResponseMessage::new()
        .embed(
            CreateEmbed::new()
                .title("🎫 Support")
                .description("Select a category below to open a ticket.")
                .color(PANEL_COLOR),
        )
        .select_menu(
            CreateSelectMenu::new(
                TICKET_DEPARTMENT_MENU_ID,
                CreateSelectMenuKind::String { options },
            )
            .placeholder("Choose a department"),
        )
}

/// Private follow-up asking for the new ticket's priority.
pub fn priority_prompt(department: Department) -> CreateInteractionResponseMessage {
    let mut options = vec![CreateSelectMenuOption::new("No priority", NO_PRIORITY_VALUE)
        .description("Open the ticket without a priority")];
    options.extend(
        Priority::ALL
            .into_iter()
            .map(|priority| CreateSelectMenuOption::new(priority.label(), priority.slug())),
    );

    CreateInteractionResponseMessage::new()
        .ephemeral(true)
        .content(format!(
            "Opening a **{}** ticket. How urgent is it?",
            department.label()
        ))
        .select_menu(
            CreateSelectMenu::new(
                format!("{}{}", TICKET_PRIORITY_MENU_PREFIX, department.slug()),
                CreateSelectMenuKind::String { options },
            )
            .placeholder("Select a priority"),
        )
}

/// Public panel whose buttons and menu answer privately.
pub fn interactive_panel() -> CreateInteractionResponseMessage {
    let options = PrivateTopic::ALL
        .into_iter()
        .map(|topic| CreateSelectMenuOption::new(topic.label(), topic.value()))
        .collect();

    CreateInteractionResponseMessage::new()
        .embed(
            CreateEmbed::new()
                .title("Private Menu")
                .description("Click a button or select an option to see a message only you can see.")
                .color(PANEL_COLOR),
        )
        .components(vec![
            CreateActionRow::Buttons(vec![
                CreateButton::new(PRIVATE_MESSAGE_BUTTON_ID)
                    .label("Secret Message")
                    .style(ButtonStyle::Primary),
                CreateButton::new(BOT_INFO_BUTTON_ID)
                    .label("Bot Info")
                    .style(ButtonStyle::Secondary),
            ]),
            CreateActionRow::SelectMenu(
                CreateSelectMenu::new(PRIVATE_MENU_ID, CreateSelectMenuKind::String { options })
                    .placeholder("Select an option"),
            ),
        ])
}

pub fn topic_reply(topic: PrivateTopic) -> &'static str {
    match topic {
        PrivateTopic::Rules => "📜 **Rules:** 1. No spam. 2. Be respectful. 3. Follow Discord ToS.",
        PrivateTopic::Staff => "👥 **Staff:** Contact an Admin or Moderator for assistance.",
    }
}

pub fn bot_info() -> String {
    format!(
        "🤖 **{}** v{}, handling support tickets for this server.",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

pub fn designed_embed(title: &str, description: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(description)
        .color(PANEL_COLOR)
}

fn embed_designer_components() -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![
        CreateButton::new(EMBED_EDIT_BUTTON_ID)
            .label("Edit Content")
            .style(ButtonStyle::Primary),
        CreateButton::new(EMBED_FINISH_BUTTON_ID)
            .label("Post to Channel")
            .style(ButtonStyle::Success),
    ])]
}

/// Private embed designer started by `/embedbuilder`.
pub fn embed_designer() -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new()
        .ephemeral(true)
        .content("Click \"Edit Content\" to set the Title and Description.")
        .embed(designed_embed("New Embed", "Editing..."))
        .components(embed_designer_components())
}

/// Designer message after a modal submission, showing the new embed.
pub fn embed_designer_update(title: &str, description: &str) -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new()
        .embed(designed_embed(title, description))
        .components(embed_designer_components())
}

/// Modal editing the designed embed, prefilled with its current content.
pub fn embed_modal(title: Option<&str>, description: Option<&str>) -> CreateModal {
    let mut title_input =
        CreateInputText::new(InputTextStyle::Short, "Title", EMBED_TITLE_INPUT_ID)
            .max_length(EMBED_TITLE_MAX_LEN)
            .required(true);
    if let Some(title) = title {
        title_input = title_input.value(title);
    }

    let mut description_input =
        CreateInputText::new(InputTextStyle::Paragraph, "Description", EMBED_DESCRIPTION_INPUT_ID)
            .max_length(EMBED_DESCRIPTION_MAX_LEN)
            .required(true);
    if let Some(description) = description {
        description_input = description_input.value(description);
    }

    CreateModal::new(EMBED_MODAL_ID, "Embed Designer").components(vec![
        CreateActionRow::InputText(title_input),
        CreateActionRow::InputText(description_input),
    ])
}

/// Designer message once the embed has been posted publicly.
pub fn embed_posted() -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new()
        .content(EMBED_POSTED)
        .embeds(Vec::new())
        .components(Vec::new())
}
