//! Ticket factory for creating test ticket snapshot rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating ticket rows with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::ticket::TicketFactory;
///
/// let ticket = TicketFactory::new(&db)
///     .department("management")
///     .priority(Some("urgent"))
///     .build()
///     .await?;
/// ```
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    channel_id: String,
    guild_id: String,
    channel_name: String,
    opener_id: String,
    department: String,
    priority: Option<String>,
    control_message_id: String,
    claimed_by: Option<String>,
    start_time: DateTime<Utc>,
}

impl<'a> TicketFactory<'a> {
    /// Creates a new TicketFactory with default values.
    ///
    /// Defaults:
    /// - channel, opener and control message ids: unique generated ids
    /// - guild_id: `"1"`
    /// - channel_name: `"ticket-general-user{id}"`
    /// - department: `"general"`
    /// - priority: `None`
    /// - claimed_by: `None`
    /// - start_time: now
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            channel_id: next_id().to_string(),
            guild_id: "1".to_string(),
            channel_name: format!("ticket-general-user{}", next_id()),
            opener_id: next_id().to_string(),
            department: "general".to_string(),
            priority: None,
            control_message_id: next_id().to_string(),
            claimed_by: None,
            start_time: Utc::now(),
        }
    }

    /// Sets the ticket channel id.
    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    /// Sets the opener's user id.
    pub fn opener_id(mut self, opener_id: impl Into<String>) -> Self {
        self.opener_id = opener_id.into();
        self
    }

    /// Sets the stored department slug.
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the stored priority slug.
    pub fn priority(mut self, priority: Option<&str>) -> Self {
        self.priority = priority.map(str::to_string);
        self
    }

    /// Marks the ticket as claimed by the given staff id.
    pub fn claimed_by(mut self, staff_id: impl Into<String>) -> Self {
        self.claimed_by = Some(staff_id.into());
        self
    }

    /// Sets the ticket creation time.
    pub fn start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    /// Inserts the ticket row.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created ticket row
    /// - `Err(DbErr)` - Database error during insertion
    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        entity::ticket::ActiveModel {
            id: ActiveValue::NotSet,
            channel_id: ActiveValue::Set(self.channel_id),
            guild_id: ActiveValue::Set(self.guild_id),
            channel_name: ActiveValue::Set(self.channel_name),
            opener_id: ActiveValue::Set(self.opener_id),
            department: ActiveValue::Set(self.department),
            priority: ActiveValue::Set(self.priority),
            control_message_id: ActiveValue::Set(self.control_message_id),
            claimed_by: ActiveValue::Set(self.claimed_by),
            start_time: ActiveValue::Set(self.start_time),
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unclaimed general ticket with default values.
pub async fn create_ticket(db: &DatabaseConnection) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db).build().await
}
