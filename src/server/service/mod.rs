//! Service layer for business logic and orchestration.
//!
//! Services sit between the bot's interaction handlers and the data layer. They work
//! with domain models, talk to Discord only through `DiscordGateway`, and decide which
//! failures abort an operation and which are logged and tolerated.

pub mod announcement;
pub mod discord;
pub mod guild_config;
pub mod ticket;
pub mod transcript;
