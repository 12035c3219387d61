//! Button and select menu handling.

use serenity::all::{
    ComponentInteraction, ComponentInteractionDataKind, Context, CreateEmbed,
    CreateInteractionResponse, CreateMessage,
};

use crate::{
    model::ticket::{Department, Priority},
    server::{
        bot::{
            action::{ComponentAction, PrivateTopic},
            handler::reply,
            panel,
        },
        error::AppError,
        model::ticket::OpenTicketParam,
        state::AppState,
    },
};

async fn respond(
    ctx: &Context,
    component: &ComponentInteraction,
    response: CreateInteractionResponse,
) {
    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!(
            "Failed to respond to component {}: {:?}",
            component.data.custom_id,
            e
        );
    }
}

/// Decodes and runs a button press or menu selection.
pub async fn handle_component(state: &AppState, ctx: &Context, component: ComponentInteraction) {
    let values = match &component.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => values.clone(),
        _ => Vec::new(),
    };

    let action = match ComponentAction::decode(&component.data.custom_id, &values) {
        Ok(action) => action,
        Err(e) => {
            let message = reply::report_error(&AppError::from(e), "Component decoding");
            respond(ctx, &component, reply::ephemeral(message)).await;
            return;
        }
    };

    tracing::debug!("{:?} pressed by {}", action, component.user.id);

    match action {
        ComponentAction::SelectDepartment(department) => {
            select_department(state, ctx, &component, department).await
        }
        ComponentAction::SelectPriority {
            department,
            priority,
        } => open_ticket(state, ctx, &component, department, priority).await,
        ComponentAction::Claim => claim_ticket(state, ctx, &component).await,
        ComponentAction::Close => close_ticket(state, ctx, &component).await,
        ComponentAction::PrivateMessage => {
            respond(ctx, &component, reply::ephemeral(panel::SECRET_MESSAGE)).await
        }
        ComponentAction::BotInfo => {
            respond(ctx, &component, reply::ephemeral(panel::bot_info())).await
        }
        ComponentAction::PrivateMenu(topic) => private_menu(ctx, &component, topic).await,
        ComponentAction::EditEmbed => {
            let embed = component.message.embeds.first();
            let modal = panel::embed_modal(
                embed.and_then(|embed| embed.title.as_deref()),
                embed.and_then(|embed| embed.description.as_deref()),
            );
            respond(ctx, &component, CreateInteractionResponse::Modal(modal)).await;
        }
        ComponentAction::FinishEmbed => finish_embed(state, ctx, &component).await,
    }
}

/// First step of ticket creation: ask for a priority.
///
/// A department without a configured role is refused here so the user learns about it
/// before picking a priority.
async fn select_department(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
    department: Department,
) {
    let config = state.guild_config.current();
    let response = match config.require_department_role(department) {
        Ok(_) => CreateInteractionResponse::Message(panel::priority_prompt(department)),
        Err(e) => reply::ephemeral(reply::report_error(
            &AppError::from(e),
            "Ticket department selection",
        )),
    };

    respond(ctx, component, response).await;
}

async fn open_ticket(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
    department: Department,
    priority: Option<Priority>,
) {
    // Creating the channel takes several requests, acknowledge before the token expires.
    if let Err(e) = component
        .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
        .await
    {
        tracing::error!("Failed to acknowledge ticket creation: {:?}", e);
        return;
    }

    let result = async {
        let param = OpenTicketParam {
            guild_id: reply::guild_id(component.guild_id)?,
            opener: reply::actor(component.member.as_ref())?,
            department,
            priority,
        };
        state.tickets.open(param).await
    }
    .await;

    let content = match result {
        Ok(ticket) => reply::ticket_opened(&ticket),
        Err(e) => reply::report_error(&e, "Ticket creation"),
    };
    if let Err(e) = component
        .edit_response(&ctx.http, reply::edited(content))
        .await
    {
        tracing::error!("Failed to deliver ticket creation result: {:?}", e);
    }
}

async fn claim_ticket(state: &AppState, ctx: &Context, component: &ComponentInteraction) {
    if let Err(e) = component
        .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
        .await
    {
        tracing::error!("Failed to acknowledge claim: {:?}", e);
        return;
    }

    let result = async {
        let actor = reply::actor(component.member.as_ref())?;
        state
            .tickets
            .claim(&actor, component.channel_id.get())
            .await
    }
    .await;

    // Success is visible through the updated control message and the claim notice.
    if let Err(e) = result {
        let message = reply::report_error(&e, "Ticket claim");
        if let Err(e) = component
            .create_followup(&ctx.http, reply::ephemeral_followup(message))
            .await
        {
            tracing::error!("Failed to send claim failure: {:?}", e);
        }
    }
}

async fn close_ticket(state: &AppState, ctx: &Context, component: &ComponentInteraction) {
    if let Err(e) = component.defer_ephemeral(&ctx.http).await {
        tracing::error!("Failed to defer close: {:?}", e);
        return;
    }

    let result = async {
        let actor = reply::actor(component.member.as_ref())?;
        state
            .tickets
            .close(&actor, component.channel_id.get())
            .await
    }
    .await;

    let content = match result {
        Ok(report) => reply::ticket_closed(&report),
        Err(e) => reply::report_error(&e, "Ticket close"),
    };
    if let Err(e) = component
        .edit_response(&ctx.http, reply::edited(content))
        .await
    {
        tracing::error!("Failed to deliver close result: {:?}", e);
    }
}

async fn private_menu(ctx: &Context, component: &ComponentInteraction, topic: PrivateTopic) {
    respond(ctx, component, reply::ephemeral(panel::topic_reply(topic))).await;
}

/// Reposts the designed embed publicly and retires the designer message.
async fn finish_embed(state: &AppState, ctx: &Context, component: &ComponentInteraction) {
    let Some(embed) = component.message.embeds.first().cloned() else {
        respond(
            ctx,
            component,
            reply::ephemeral("There is no embed to post yet."),
        )
        .await;
        return;
    };

    let message = CreateMessage::new().embed(CreateEmbed::from(embed));
    let response = match state
        .gateway
        .send_message(component.channel_id.get(), message)
        .await
    {
        Ok(message_id) => {
            tracing::info!(
                "Designed embed {} posted in {} by {}",
                message_id,
                component.channel_id,
                component.user.id
            );
            CreateInteractionResponse::UpdateMessage(panel::embed_posted())
        }
        Err(e) => reply::ephemeral(reply::report_error(&e, "Embed posting")),
    };

    respond(ctx, component, response).await;
}
