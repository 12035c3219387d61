//! Persistence layer for the ticket registry snapshot and guild configuration.
//!
//! Repositories wrap SeaORM entity access for the `ticket` and `ticket_cooldown` tables
//! and return entity models; conversion into domain models happens in the service layer
//! via `Ticket::from_entity`. The guild configuration is a single JSON record kept on
//! disk by `GuildConfigStore`.

pub mod guild_config;
pub mod ticket;
pub mod ticket_cooldown;

#[cfg(test)]
mod test;
