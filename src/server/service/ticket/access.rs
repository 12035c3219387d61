//! Who may act on a ticket.
//!
//! Administrators and the oversight role may act on every ticket. Department staff may
//! claim tickets of their department and close them while unclaimed; once claimed only
//! the claimant (or an elevated member) may close it or change its priority. The opener
//! has no moderation rights over their own ticket.

use crate::server::{
    error::ticket::TicketError,
    model::{actor::Actor, guild_config::GuildConfig, ticket::Ticket},
};

/// Administrator or oversight role.
fn is_elevated(actor: &Actor, config: &GuildConfig) -> bool {
    actor.is_admin || actor.has_role(config.oversight_role_id)
}

fn is_department_staff(actor: &Actor, ticket: &Ticket, config: &GuildConfig) -> bool {
    actor.has_role(config.department_role(ticket.department))
}

pub fn can_claim(actor: &Actor, ticket: &Ticket, config: &GuildConfig) -> Result<(), TicketError> {
    if is_elevated(actor, config) || is_department_staff(actor, ticket, config) {
        return Ok(());
    }

    Err(TicketError::NotAuthorized(format!(
        "Only {} staff can claim this ticket.",
        ticket.department.label()
    )))
}

pub fn can_close(actor: &Actor, ticket: &Ticket, config: &GuildConfig) -> Result<(), TicketError> {
    if is_elevated(actor, config) {
        return Ok(());
    }

    match ticket.claimed_by {
        Some(holder_id) if holder_id == actor.user_id => Ok(()),
        Some(holder_id) => Err(TicketError::NotAuthorized(format!(
            "Only <@{}>, who claimed this ticket, can close it.",
            holder_id
        ))),
        None if is_department_staff(actor, ticket, config) => Ok(()),
        None => Err(TicketError::NotAuthorized(format!(
            "Only {} staff can close this ticket.",
            ticket.department.label()
        ))),
    }
}

pub fn can_set_priority(
    actor: &Actor,
    ticket: &Ticket,
    config: &GuildConfig,
) -> Result<(), TicketError> {
    if is_elevated(actor, config) || ticket.claimed_by == Some(actor.user_id) {
        return Ok(());
    }

    Err(TicketError::NotAuthorized(
        "Only the staff member who claimed this ticket can change its priority.".to_string(),
    ))
}

/// Guild-wide configuration commands.
pub fn can_configure(actor: &Actor) -> Result<(), TicketError> {
    if actor.is_admin {
        return Ok(());
    }

    Err(TicketError::NotAuthorized(
        "You need the Administrator permission to do that.".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ticket::Department;
    use chrono::Utc;

    const STAFF_ROLE: u64 = 20;
    const IA_ROLE: u64 = 30;
    const OVERSIGHT_ROLE: u64 = 40;

    fn config() -> GuildConfig {
        GuildConfig {
            log_channel_id: Some(10),
            staff_role_id: Some(STAFF_ROLE),
            internal_affairs_role_id: Some(IA_ROLE),
            oversight_role_id: Some(OVERSIGHT_ROLE),
            ..Default::default()
        }
    }

    fn actor(user_id: u64, role_ids: &[u64]) -> Actor {
        Actor {
            user_id,
            name: format!("user{}", user_id),
            role_ids: role_ids.to_vec(),
            is_admin: false,
        }
    }

    fn ticket(department: Department, claimed_by: Option<u64>) -> Ticket {
        Ticket {
            channel_id: 1,
            guild_id: 2,
            channel_name: "ticket".to_string(),
            opener_id: 3,
            department,
            priority: None,
            control_message_id: 4,
            claimed_by,
            start_time: Utc::now(),
        }
    }

    #[test]
    fn staff_claims_only_their_department() {
        let config = config();
        let general_staff = actor(5, &[STAFF_ROLE]);

        assert!(can_claim(&general_staff, &ticket(Department::General, None), &config).is_ok());
        assert!(matches!(
            can_claim(&general_staff, &ticket(Department::InternalAffairs, None), &config),
            Err(TicketError::NotAuthorized(_))
        ));
    }

    #[test]
    fn elevated_members_claim_any_department() {
        let config = config();
        let oversight = actor(6, &[OVERSIGHT_ROLE]);
        let admin = Actor {
            is_admin: true,
            ..actor(7, &[])
        };

        let ticket = ticket(Department::InternalAffairs, None);
        assert!(can_claim(&oversight, &ticket, &config).is_ok());
        assert!(can_claim(&admin, &ticket, &config).is_ok());
    }

    #[test]
    fn opener_cannot_close_own_ticket() {
        let config = config();
        let opener = actor(3, &[]);

        assert!(can_close(&opener, &ticket(Department::General, None), &config).is_err());
    }

    #[test]
    fn claimed_ticket_closes_only_by_claimant_or_elevated() {
        let config = config();
        let ticket = ticket(Department::General, Some(5));

        assert!(can_close(&actor(5, &[STAFF_ROLE]), &ticket, &config).is_ok());
        assert!(can_close(&actor(8, &[STAFF_ROLE]), &ticket, &config).is_err());
        assert!(can_close(&actor(6, &[OVERSIGHT_ROLE]), &ticket, &config).is_ok());
    }

    #[test]
    fn unclaimed_ticket_closes_by_department_staff() {
        let config = config();
        let ticket = ticket(Department::General, None);

        assert!(can_close(&actor(8, &[STAFF_ROLE]), &ticket, &config).is_ok());
        assert!(can_close(&actor(9, &[IA_ROLE]), &ticket, &config).is_err());
    }

    #[test]
    fn priority_requires_claimant() {
        let config = config();
        let unclaimed = ticket(Department::General, None);
        let claimed = ticket(Department::General, Some(5));

        assert!(can_set_priority(&actor(5, &[STAFF_ROLE]), &unclaimed, &config).is_err());
        assert!(can_set_priority(&actor(5, &[STAFF_ROLE]), &claimed, &config).is_ok());
        assert!(can_set_priority(&actor(6, &[OVERSIGHT_ROLE]), &unclaimed, &config).is_ok());
    }

    /// An unset oversight role must not grant anything to members without roles.
    #[test]
    fn unset_roles_grant_nothing() {
        let config = GuildConfig::default();

        assert!(can_claim(&actor(5, &[]), &ticket(Department::General, None), &config).is_err());
    }
}
