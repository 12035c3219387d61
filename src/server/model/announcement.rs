//! Parameters for announcement embeds.

/// Promotion of a member to a new rank role.
#[derive(Debug, Clone)]
pub struct Promotion {
    pub user_id: u64,
    pub rank_role_id: u64,
    pub reason: Option<String>,
    pub issued_by: u64,
}

/// Infraction issued to a member.
#[derive(Debug, Clone)]
pub struct Infraction {
    pub user_id: u64,
    pub punishment: String,
    pub reason: String,
    pub issued_by: u64,
}
