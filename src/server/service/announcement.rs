//! Staff announcements: promotions and infractions.

use std::sync::Arc;

use serenity::all::CreateEmbed;

use crate::server::{
    model::announcement::{Infraction, Promotion},
    service::discord::DiscordGateway,
};

const PROMOTION_COLOR: u32 = 0x2ecc71;
const INFRACTION_COLOR: u32 = 0xe74c3c;

pub struct AnnouncementService {
    gateway: Arc<dyn DiscordGateway>,
}

impl AnnouncementService {
    pub fn new(gateway: Arc<dyn DiscordGateway>) -> Self {
        Self { gateway }
    }

    /// Grants the promotion's rank role.
    ///
    /// Returns whether the role was added. The announcement is posted either way.
    pub async fn promote(&self, guild_id: u64, promotion: &Promotion) -> bool {
        match self
            .gateway
            .add_member_role(
                guild_id,
                promotion.user_id,
                promotion.rank_role_id,
                &format!("Promoted by {}", promotion.issued_by),
            )
            .await
        {
            Ok(()) => {
                tracing::info!(
                    "User {} promoted to role {} by {}",
                    promotion.user_id,
                    promotion.rank_role_id,
                    promotion.issued_by
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to add rank role {} to user {}: {}",
                    promotion.rank_role_id,
                    promotion.user_id,
                    e
                );
                false
            }
        }
    }

    pub fn promotion_embed(promotion: &Promotion) -> CreateEmbed {
        CreateEmbed::new()
            .title("Staff Promotion")
            .description(format!(
                "Congratulations <@{}>, you have been promoted!",
                promotion.user_id
            ))
            .color(PROMOTION_COLOR)
            .field("New Rank", format!("<@&{}>", promotion.rank_role_id), true)
            .field("Promoted by", format!("<@{}>", promotion.issued_by), true)
            .field(
                "Reason",
                promotion
                    .reason
                    .as_deref()
                    .unwrap_or("No reason provided"),
                false,
            )
    }

    pub fn infraction_embed(infraction: &Infraction) -> CreateEmbed {
        CreateEmbed::new()
            .title("Staff Infraction")
            .description(format!(
                "<@{}> has received an infraction.",
                infraction.user_id
            ))
            .color(INFRACTION_COLOR)
            .field("Punishment", &infraction.punishment, true)
            .field("Issued by", format!("<@{}>", infraction.issued_by), true)
            .field("Reason", &infraction.reason, false)
    }
}
