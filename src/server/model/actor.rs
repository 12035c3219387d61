//! The member behind an interaction, reduced to what access checks need.

use serenity::all::Member;

/// Guild member who triggered an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Discord user id.
    pub user_id: u64,
    /// Username, used for channel names.
    pub name: String,
    /// Role ids the member holds.
    pub role_ids: Vec<u64>,
    /// Whether the member has the Administrator permission in the channel.
    pub is_admin: bool,
}

impl Actor {
    /// Builds an actor from the member attached to an interaction.
    ///
    /// Interaction members carry their resolved channel permissions, which is where the
    /// administrator flag comes from.
    pub fn from_member(member: &Member) -> Self {
        Self {
            user_id: member.user.id.get(),
            name: member.user.name.clone(),
            role_ids: member.roles.iter().map(|role| role.get()).collect(),
            is_admin: member
                .permissions
                .is_some_and(|permissions| permissions.administrator()),
        }
    }

    /// Whether the actor holds `role_id`. An unset role is never held.
    pub fn has_role(&self, role_id: Option<u64>) -> bool {
        role_id.is_some_and(|role_id| self.role_ids.contains(&role_id))
    }
}
