use super::*;
use crate::model::ticket::Priority;
use entity::prelude::{Ticket as TicketRow, TicketCooldown as CooldownRow};
use sea_orm::EntityTrait;
use serenity::all::{PermissionOverwriteType, Permissions, RoleId, UserId};

/// Tests opening a general ticket with no existing ticket and no cooldown.
///
/// Verifies that a channel visible to the opener and the general staff role is created
/// under the configured category, the control message with Claim and Close buttons is
/// posted, and the ticket is registered, persisted and marked with the ticket role.
///
/// Expected: Ok with the new ticket
#[tokio::test]
async fn opens_general_ticket() {
    let h = harness(configured()).await;
    let alice = member(100, "Alice");

    let ticket = h
        .service
        .open(open_param(&alice, Department::General))
        .await
        .unwrap();

    let created = h.gateway.created_channels();
    assert_eq!(created.len(), 1);
    let (channel_id, request) = &created[0];
    assert_eq!(*channel_id, ticket.channel_id);
    assert_eq!(request.name, "ticket-general-alice");
    assert_eq!(request.category_id, Some(CATEGORY));

    let opener = request
        .overwrites
        .iter()
        .find(|o| o.kind == PermissionOverwriteType::Member(UserId::new(100)))
        .unwrap();
    assert!(opener.allow.contains(Permissions::VIEW_CHANNEL));
    for role_id in [STAFF_ROLE, OVERSIGHT_ROLE] {
        let staff = request
            .overwrites
            .iter()
            .find(|o| o.kind == PermissionOverwriteType::Role(RoleId::new(role_id)))
            .unwrap();
        assert!(staff.allow.contains(Permissions::VIEW_CHANNEL));
    }

    let sent = h.gateway.sent_to(ticket.channel_id);
    assert_eq!(sent.len(), 1);
    let control = sent[0].to_string();
    assert!(control.contains("ticket_claim"));
    assert!(control.contains("ticket_close"));
    assert!(control.contains("<@&20>"));

    assert_eq!(h.service.get(ticket.channel_id), Some(ticket.clone()));
    assert_eq!(TicketRow::find().all(&h.db).await.unwrap().len(), 1);
    assert_eq!(CooldownRow::find().all(&h.db).await.unwrap().len(), 1);
    assert!(h.gateway.calls().iter().any(|call| matches!(
        call,
        GatewayCall::AddMemberRole {
            user_id: 100,
            role_id: TICKET_ROLE
        }
    )));
}

/// Tests a second open by a user who already has a ticket.
///
/// Expected: Err(DuplicateTicket) naming the existing channel, no new channel
#[tokio::test]
async fn rejects_second_ticket_for_same_user() {
    let h = harness(configured()).await;
    let alice = member(100, "Alice");

    let first = h
        .service
        .open(open_param(&alice, Department::General))
        .await
        .unwrap();
    let second = h
        .service
        .open(open_param(&alice, Department::InternalAffairs))
        .await;

    assert!(matches!(
        second,
        Err(AppError::TicketErr(TicketError::DuplicateTicket { channel_id })) if channel_id == first.channel_id
    ));
    assert_eq!(h.gateway.created_channels().len(), 1);
    assert_eq!(h.service.open_count(), 1);
}

/// Tests opening again right after the previous ticket went away.
///
/// Expected: Err(Cooldown) with the remaining seconds
#[tokio::test]
async fn rejects_open_during_cooldown() {
    let h = harness(configured()).await;
    let alice = member(100, "Alice");

    let first = h
        .service
        .open(open_param(&alice, Department::General))
        .await
        .unwrap();
    h.service.registry().remove(first.channel_id);

    let result = h
        .service
        .open(open_param(&alice, Department::General))
        .await;

    assert!(matches!(
        result,
        Err(AppError::TicketErr(TicketError::Cooldown { remaining_secs })) if (1..=60).contains(&remaining_secs)
    ));
    assert_eq!(h.gateway.created_channels().len(), 1);
}

/// Tests opening a ticket for a department whose role was never configured.
///
/// Expected: Err(ConfigIncomplete) and no Discord calls at all
#[tokio::test]
async fn unconfigured_department_creates_nothing() {
    let h = harness(GuildConfig {
        log_channel_id: Some(LOG_CHANNEL),
        staff_role_id: Some(STAFF_ROLE),
        ..Default::default()
    })
    .await;

    let result = h
        .service
        .open(open_param(&member(100, "Alice"), Department::InternalAffairs))
        .await;

    assert!(matches!(
        result,
        Err(AppError::TicketErr(TicketError::ConfigIncomplete("internal_affairs")))
    ));
    assert!(h.gateway.calls().is_empty());
    assert_eq!(h.service.open_count(), 0);
}

/// Tests opening without a configured category.
///
/// Expected: Ok with the channel placed in the `Tickets` category
#[tokio::test]
async fn falls_back_to_tickets_category() {
    let h = harness(GuildConfig {
        category_id: None,
        ..configured()
    })
    .await;

    h.service
        .open(open_param(&member(100, "Alice"), Department::General))
        .await
        .unwrap();

    assert!(h.gateway.calls().iter().any(|call| matches!(
        call,
        GatewayCall::FindOrCreateCategory { name, .. } if name == "Tickets"
    )));
    assert_eq!(h.gateway.created_channels()[0].1.category_id, Some(500));
}

/// Tests a control message failure after the channel was created.
///
/// Expected: Err, the channel is deleted again and the user may retry immediately
#[tokio::test]
async fn control_message_failure_removes_channel() {
    let h = harness(configured()).await;
    h.gateway.fail_on(FailOn::SendMessage);

    let result = h
        .service
        .open(open_param(&member(100, "Alice"), Department::General))
        .await;

    assert!(result.is_err());
    let (channel_id, _) = h.gateway.created_channels()[0].clone();
    assert_eq!(h.gateway.deleted_channels(), vec![channel_id]);
    assert_eq!(h.service.open_count(), 0);
    assert!(h
        .service
        .registry()
        .begin_open(100, chrono::Utc::now(), Duration::seconds(60))
        .is_ok());
}

/// Tests a channel creation failure.
///
/// Expected: Err and nothing registered
#[tokio::test]
async fn channel_creation_failure_registers_nothing() {
    let h = harness(configured()).await;
    h.gateway.fail_on(FailOn::CreateChannel);

    let result = h
        .service
        .open(open_param(&member(100, "Alice"), Department::General))
        .await;

    assert!(matches!(result, Err(AppError::IoErr(_))));
    assert_eq!(h.service.open_count(), 0);
    assert!(TicketRow::find().all(&h.db).await.unwrap().is_empty());
}

/// Tests opening with a priority chosen up front.
///
/// Expected: Ok with the priority in the channel name but not in the stored base name
#[tokio::test]
async fn opens_with_priority() {
    let h = harness(configured()).await;
    let mut param = open_param(&member(100, "Alice"), Department::General);
    param.priority = Some(Priority::High);

    let ticket = h.service.open(param).await.unwrap();

    assert_eq!(ticket.channel_name, "ticket-general-alice");
    assert_eq!(
        h.gateway.created_channels()[0].1.name,
        "high-ticket-general-alice"
    );
    assert_eq!(ticket.priority, Some(Priority::High));
}
