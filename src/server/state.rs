//! State shared by the Discord event handler and the liveness server.

use std::sync::Arc;

use crate::server::service::{
    announcement::AnnouncementService, discord::DiscordGateway, guild_config::GuildConfigService,
    ticket::TicketService,
};

/// Shared services, cloned into every event handler invocation and request.
///
/// Every field is reference-counted, so clones share the same registry and
/// configuration.
#[derive(Clone)]
pub struct AppState {
    /// Ticket lifecycle and the registry of open tickets.
    pub tickets: TicketService,

    /// Guild configuration written by `/setup`.
    pub guild_config: GuildConfigService,

    /// Promotion and infraction announcements.
    pub announcements: Arc<AnnouncementService>,

    /// Outbound Discord operations.
    pub gateway: Arc<dyn DiscordGateway>,
}

impl AppState {
    pub fn new(tickets: TicketService, gateway: Arc<dyn DiscordGateway>) -> Self {
        Self {
            guild_config: tickets.guild_config().clone(),
            announcements: Arc::new(AnnouncementService::new(gateway.clone())),
            tickets,
            gateway,
        }
    }
}
