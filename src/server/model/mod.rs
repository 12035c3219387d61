//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and from
//! serenity types at the bot boundary, so the service layer only deals with plain ids
//! and the shared enums in `crate::model`.

pub mod actor;
pub mod announcement;
pub mod guild_config;
pub mod ticket;
pub mod transcript;
