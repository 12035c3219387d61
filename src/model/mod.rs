//! Shared value types used across the bot and its persistence layer.
//!
//! These enums travel through component custom ids, slash command choices, the JSON
//! config file and the SQLite snapshot, so each one has a stable slug form.

pub mod ticket;
