//! Guild configuration record written by `/setup`.

use serde::{Deserialize, Serialize};

use crate::{model::ticket::Department, server::error::ticket::TicketError};

/// Guild-wide ticket settings persisted to the guild config file.
///
/// Every field is optional so a partially configured guild is representable; operations
/// that need an unset value fail with `TicketError::ConfigIncomplete` at the time they
/// run rather than at setup time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildConfig {
    /// Channel receiving ticket audit logs and transcripts.
    pub log_channel_id: Option<u64>,
    /// Staff role for the general department.
    pub staff_role_id: Option<u64>,
    pub internal_affairs_role_id: Option<u64>,
    pub management_role_id: Option<u64>,
    pub partnership_role_id: Option<u64>,
    /// Elevated role with access to every ticket.
    pub oversight_role_id: Option<u64>,
    /// Marker role held by members while they have an open ticket.
    pub ticket_role_id: Option<u64>,
    /// Parent category for ticket channels.
    pub category_id: Option<u64>,
    /// Roles explicitly denied access to ticket channels.
    pub blocked_role_ids: Vec<u64>,
}

impl GuildConfig {
    /// Staff role configured for a department.
    pub fn department_role(&self, department: Department) -> Option<u64> {
        match department {
            Department::General => self.staff_role_id,
            Department::InternalAffairs => self.internal_affairs_role_id,
            Department::Management => self.management_role_id,
            Department::Partnership => self.partnership_role_id,
        }
    }

    /// Name of the `/setup` option holding a department's role.
    pub fn department_setting(department: Department) -> &'static str {
        match department {
            Department::General => "staff",
            Department::InternalAffairs => "internal_affairs",
            Department::Management => "management",
            Department::Partnership => "partnership",
        }
    }

    /// Staff role for a department, or the configuration error naming the missing option.
    pub fn require_department_role(&self, department: Department) -> Result<u64, TicketError> {
        self.department_role(department)
            .ok_or(TicketError::ConfigIncomplete(Self::department_setting(
                department,
            )))
    }

    /// `/setup` options that are currently unset, in option order.
    pub fn unset_settings(&self) -> Vec<&'static str> {
        let settings = [
            ("logs", self.log_channel_id),
            ("staff", self.staff_role_id),
            ("internal_affairs", self.internal_affairs_role_id),
            ("management", self.management_role_id),
            ("partnership", self.partnership_role_id),
            ("oversight", self.oversight_role_id),
            ("ticket_role", self.ticket_role_id),
            ("category", self.category_id),
        ];

        settings
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name)
            .collect()
    }
}
