use crate::server::data::ticket_cooldown::TicketCooldownRepository;
use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod delete_older_than;
mod upsert;
