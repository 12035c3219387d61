//! Ticket desk backend: Discord bot, ticket lifecycle and persistence.
//!
//! The bot uses Serenity for the Discord gateway and REST API, SeaORM over SQLite for
//! the open ticket snapshot, and Axum for a small liveness endpoint.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Bot Layer** (`bot/`) - Slash commands, panels and interaction dispatch
//! - **Service Layer** (`service/`) - Ticket lifecycle, transcripts, announcements and the
//!   Discord gateway abstraction
//! - **Data Layer** (`data/`) - Snapshot repositories and the guild config file store
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and user-facing reply mapping
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared services handed to the bot and the router
//! - **Startup** (`startup`) - Logging, database and guild config initialization
//! - **Router** (`router`) - Axum liveness route
//! - **Scheduler** (`scheduler/`) - Cron job pruning expired ticket cooldowns
//!
//! # Interaction Flow
//!
//! 1. **Handler** receives the interaction and decodes it into a typed action
//! 2. **Handler** builds the `Actor` from the invoking member and defers if needed
//! 3. **Service** checks access, updates the registry and calls Discord
//! 4. **Data** snapshots the ticket state to SQLite
//! 5. **Handler** replies, mapping any error to a user-facing message

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
