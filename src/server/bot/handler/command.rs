//! Slash command handling.

use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
};

use crate::server::{
    bot::{
        action::{CommandOptions, SlashCommand},
        handler::reply,
        panel,
    },
    error::AppError,
    model::{
        announcement::{Infraction, Promotion},
        guild_config::GuildConfig,
    },
    service::{announcement::AnnouncementService, ticket::access},
    state::AppState,
};

async fn respond(ctx: &Context, command: &CommandInteraction, response: CreateInteractionResponse) {
    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::error!("Failed to respond to /{}: {:?}", command.data.name, e);
    }
}

/// Decodes and runs a slash command.
pub async fn handle_command(state: &AppState, ctx: &Context, command: CommandInteraction) {
    let options = CommandOptions::new(&command.data.options);
    let decoded = match SlashCommand::decode(&command.data.name, &options) {
        Ok(decoded) => decoded,
        Err(e) => {
            let message = reply::report_error(&AppError::from(e), "Command decoding");
            respond(ctx, &command, reply::ephemeral(message)).await;
            return;
        }
    };

    tracing::debug!("/{} invoked by {}", command.data.name, command.user.id);

    match decoded {
        SlashCommand::Setup(config) => setup(state, ctx, &command, config).await,
        SlashCommand::Panel => {
            let response = match reply::guild_id(command.guild_id) {
                Ok(_) => CreateInteractionResponse::Message(panel::ticket_panel()),
                Err(e) => reply::ephemeral(e.to_string()),
            };
            respond(ctx, &command, response).await;
        }
        SlashCommand::Priority(priority) => {
            if let Err(e) = command.defer_ephemeral(&ctx.http).await {
                tracing::error!("Failed to defer /priority: {:?}", e);
                return;
            }

            let result = async {
                let actor = reply::actor(command.member.as_deref())?;
                state
                    .tickets
                    .set_priority(&actor, command.channel_id.get(), priority)
                    .await
            }
            .await;

            let content = match result {
                Ok(ticket) => reply::priority_updated(&ticket),
                Err(e) => reply::report_error(&e, "/priority"),
            };
            if let Err(e) = command
                .edit_response(&ctx.http, reply::edited(content))
                .await
            {
                tracing::error!("Failed to edit /priority response: {:?}", e);
            }
        }
        SlashCommand::Interactive => {
            respond(
                ctx,
                &command,
                CreateInteractionResponse::Message(panel::interactive_panel()),
            )
            .await
        }
        SlashCommand::EmbedBuilder => {
            respond(
                ctx,
                &command,
                CreateInteractionResponse::Message(panel::embed_designer()),
            )
            .await
        }
        SlashCommand::Promote {
            user_id,
            rank_role_id,
            reason,
        } => {
            let (guild_id, actor) = match reply::guild_id(command.guild_id)
                .and_then(|guild_id| Ok((guild_id, reply::actor(command.member.as_deref())?)))
            {
                Ok(context) => context,
                Err(e) => {
                    respond(ctx, &command, reply::ephemeral(e.to_string())).await;
                    return;
                }
            };

            let promotion = Promotion {
                user_id,
                rank_role_id,
                reason,
                issued_by: actor.user_id,
            };
            respond(
                ctx,
                &command,
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .embed(AnnouncementService::promotion_embed(&promotion)),
                ),
            )
            .await;

            if !state.announcements.promote(guild_id, &promotion).await {
                if let Err(e) = command
                    .create_followup(
                        &ctx.http,
                        reply::ephemeral_followup(format!(
                            "The announcement was posted but <@&{}> could not be added. Check that the bot's role is above it.",
                            rank_role_id
                        )),
                    )
                    .await
                {
                    tracing::error!("Failed to send /promote follow-up: {:?}", e);
                }
            }
        }
        SlashCommand::Infract {
            user_id,
            punishment,
            reason,
        } => {
            let response = match reply::actor(command.member.as_deref()) {
                Ok(actor) => {
                    let infraction = Infraction {
                        user_id,
                        punishment,
                        reason,
                        issued_by: actor.user_id,
                    };
                    tracing::info!(
                        "Infraction issued to {} by {}: {}",
                        infraction.user_id,
                        infraction.issued_by,
                        infraction.punishment
                    );
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new()
                            .embed(AnnouncementService::infraction_embed(&infraction)),
                    )
                }
                Err(e) => reply::ephemeral(e.to_string()),
            };
            respond(ctx, &command, response).await;
        }
    }
}

/// Replaces the guild configuration. Administrators only.
async fn setup(state: &AppState, ctx: &Context, command: &CommandInteraction, config: GuildConfig) {
    let result = async {
        let actor = reply::actor(command.member.as_deref())?;
        access::can_configure(&actor)?;

        let saved = state.guild_config.replace(config).await?;
        tracing::info!("Guild configuration replaced by {}", actor.user_id);

        Ok::<_, AppError>(reply::setup_summary(&saved))
    }
    .await;

    let content = result.unwrap_or_else(|e| reply::report_error(&e, "/setup"));
    respond(ctx, command, reply::ephemeral(content)).await;
}
