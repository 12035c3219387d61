//! Factory methods for creating test data.
//!
//! Factories insert snapshot rows with sensible defaults so repository tests only spell
//! out the fields they care about.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let ticket = factory::create_ticket(&db).await?;
//! let claimed = factory::ticket::TicketFactory::new(&db)
//!     .claimed_by("42")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `ticket` - Create open ticket rows
//! - `ticket_cooldown` - Create per-user cooldown rows
//! - `helpers` - Shared id generation

pub mod helpers;
pub mod ticket;
pub mod ticket_cooldown;

pub use ticket::create_ticket;
pub use ticket_cooldown::create_cooldown;
