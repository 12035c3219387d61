use crate::{
    model::ticket::{Department, Priority},
    server::{data::ticket::TicketRepository, model::ticket::Ticket},
};
use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod delete_by_channel_id;
mod get_all;
mod upsert;

fn sample_ticket(channel_id: u64) -> Ticket {
    Ticket {
        channel_id,
        guild_id: 1,
        channel_name: "ticket-general-alice".to_string(),
        opener_id: 42,
        department: Department::General,
        priority: None,
        control_message_id: 900,
        claimed_by: None,
        start_time: Utc::now(),
    }
}
