//! Ticket Desk Test Utils
//!
//! Shared testing utilities for the ticket desk bot. This crate offers a builder for
//! creating test contexts backed by in-memory SQLite databases, plus factories for
//! inserting ticket snapshot rows with sensible defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn loads_open_tickets() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_ticket_tables().build().await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
