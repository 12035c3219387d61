use std::sync::Arc;

use chrono::Duration;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;
use test_utils::builder::TestBuilder;

use crate::{
    model::ticket::Department,
    server::{
        data::guild_config::GuildConfigStore,
        error::{ticket::TicketError, AppError},
        model::{actor::Actor, guild_config::GuildConfig, ticket::OpenTicketParam},
        service::{
            discord::fake::{FailOn, FakeGateway, GatewayCall},
            guild_config::GuildConfigService,
            ticket::{TicketService, TicketSettings},
            transcript::TranscriptWriter,
        },
    },
};

mod close;
mod open;

const GUILD_ID: u64 = 1;
const LOG_CHANNEL: u64 = 10;
const STAFF_ROLE: u64 = 20;
const IA_ROLE: u64 = 30;
const OVERSIGHT_ROLE: u64 = 40;
const TICKET_ROLE: u64 = 50;
const CATEGORY: u64 = 60;

struct Harness {
    service: TicketService,
    gateway: Arc<FakeGateway>,
    db: DatabaseConnection,
    dir: TempDir,
}

/// Guild with every setting configured except the management and partnership roles.
fn configured() -> GuildConfig {
    GuildConfig {
        log_channel_id: Some(LOG_CHANNEL),
        staff_role_id: Some(STAFF_ROLE),
        internal_affairs_role_id: Some(IA_ROLE),
        management_role_id: None,
        partnership_role_id: None,
        oversight_role_id: Some(OVERSIGHT_ROLE),
        ticket_role_id: Some(TICKET_ROLE),
        category_id: Some(CATEGORY),
        blocked_role_ids: vec![70],
    }
}

async fn harness(config: GuildConfig) -> Harness {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.unwrap();
    let dir = tempfile::tempdir().unwrap();

    let store = GuildConfigStore::new(dir.path().join("guild_config.json"));
    store.save(&config).await.unwrap();
    let guild_config = GuildConfigService::load(store).await.unwrap();

    let gateway = Arc::new(FakeGateway::new());
    let transcripts = TranscriptWriter::new(gateway.clone(), dir.path().join("transcripts"));
    let service = TicketService::new(
        db.clone(),
        gateway.clone(),
        guild_config,
        transcripts,
        TicketSettings::default(),
    );

    Harness {
        service,
        gateway,
        db,
        dir,
    }
}

fn member(user_id: u64, name: &str) -> Actor {
    Actor {
        user_id,
        name: name.to_string(),
        role_ids: Vec::new(),
        is_admin: false,
    }
}

fn with_roles(user_id: u64, name: &str, role_ids: &[u64]) -> Actor {
    Actor {
        role_ids: role_ids.to_vec(),
        ..member(user_id, name)
    }
}

fn open_param(opener: &Actor, department: Department) -> OpenTicketParam {
    OpenTicketParam {
        guild_id: GUILD_ID,
        opener: opener.clone(),
        department,
        priority: None,
    }
}

/// Moves a ticket's start time into the past.
fn backdate(service: &TicketService, channel_id: u64, by: Duration) {
    let mut registry = service.registry();
    let mut ticket = registry.remove(channel_id).unwrap();
    ticket.start_time -= by;
    registry.create(ticket).unwrap();
}

/// Service over the same database and gateway, as after a restart. Cooldowns are off.
fn restarted(h: &Harness) -> TicketService {
    TicketService::new(
        h.db.clone(),
        h.gateway.clone(),
        h.service.guild_config().clone(),
        TranscriptWriter::new(h.gateway.clone(), h.dir.path().join("transcripts")),
        TicketSettings {
            cooldown: Duration::zero(),
            ..TicketSettings::default()
        },
    )
}
