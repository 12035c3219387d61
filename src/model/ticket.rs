use serde::{Deserialize, Serialize};
use std::fmt;

/// Staff group a ticket is routed to.
///
/// Each department maps to one configured staff role which is granted access to the
/// ticket channel and pinged in the control message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Department {
    General,
    InternalAffairs,
    Management,
    Partnership,
}

impl Department {
    /// Every department in panel display order.
    pub const ALL: [Department; 4] = [
        Department::General,
        Department::InternalAffairs,
        Department::Management,
        Department::Partnership,
    ];

    /// Stable identifier used in custom ids, channel names and storage.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::InternalAffairs => "internal-affairs",
            Self::Management => "management",
            Self::Partnership => "partnership",
        }
    }

    /// Parses a department from its slug.
    ///
    /// # Returns
    /// - `Some(Department)` - Slug matched a department
    /// - `None` - Unknown slug
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|department| department.slug() == slug)
    }

    /// Human readable name shown in panels and embeds.
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General Support",
            Self::InternalAffairs => "Internal Affairs",
            Self::Management => "Management",
            Self::Partnership => "Partnership",
        }
    }

    /// Short description shown under the option in the ticket panel menu.
    pub fn description(&self) -> &'static str {
        match self {
            Self::General => "Questions, help and general issues",
            Self::InternalAffairs => "Report a staff member",
            Self::Management => "Appeals and matters for senior staff",
            Self::Partnership => "Partnership and affiliation requests",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Urgency tag attached to a ticket. Affects display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|priority| priority.slug() == slug)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    /// Embed colour for the control message once this priority is set.
    pub fn color(&self) -> u32 {
        match self {
            Self::Low => 0x2ecc71,
            Self::Medium => 0xf1c40f,
            Self::High => 0xe67e22,
            Self::Urgent => 0xe74c3c,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
