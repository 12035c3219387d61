//! Discord bot integration: slash commands, panels and interaction handling.
//!
//! The bot is initialized during startup and runs in a separate tokio task alongside the
//! liveness server. Interactions are decoded once in `action` into typed commands and
//! component actions, then dispatched by `handler` to the ticket and announcement
//! services held in the shared `AppState`.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild and channel events
//! - `GUILD_MESSAGES` - Receive events about messages in guilds
//! - `MESSAGE_CONTENT` - Read message content for transcripts (privileged intent)
//!
//! Note: `MESSAGE_CONTENT` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod action;
pub mod command;
pub mod handler;
pub mod panel;
pub mod start;
