//! Modal submission handling.

use std::collections::HashMap;

use serenity::all::{ActionRow, ActionRowComponent, Context, CreateInteractionResponse, ModalInteraction};

use crate::server::{
    bot::{action::ModalAction, handler::reply, panel},
    error::AppError,
};

/// Text input values of a submitted modal keyed by input custom id.
///
/// Inputs left empty are reported as empty strings.
pub fn input_values(rows: &[ActionRow]) -> HashMap<String, String> {
    rows.iter()
        .flat_map(|row| row.components.iter())
        .filter_map(|component| match component {
            ActionRowComponent::InputText(input) => Some((
                input.custom_id.clone(),
                input.value.clone().unwrap_or_default(),
            )),
            _ => None,
        })
        .collect()
}

/// Decodes and runs a modal submission.
pub async fn handle_modal(ctx: &Context, modal: ModalInteraction) {
    let fields = input_values(&modal.data.components);

    let response = match ModalAction::decode(&modal.data.custom_id, &fields) {
        Ok(ModalAction::DesignEmbed { title, description }) => {
            CreateInteractionResponse::UpdateMessage(panel::embed_designer_update(
                &title,
                &description,
            ))
        }
        Err(e) => reply::ephemeral(reply::report_error(&AppError::from(e), "Modal decoding")),
    };

    if let Err(e) = modal.create_response(&ctx.http, response).await {
        tracing::error!("Failed to respond to modal {}: {:?}", modal.data.custom_id, e);
    }
}
