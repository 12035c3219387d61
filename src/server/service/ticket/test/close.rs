use super::*;
use crate::model::ticket::Priority;
use crate::server::model::transcript::HistoryMessage;
use entity::prelude::Ticket as TicketRow;
use sea_orm::EntityTrait;

fn history() -> Vec<HistoryMessage> {
    (1..=3)
        .map(|id| HistoryMessage {
            id,
            author: "alice".to_string(),
            content: format!("message {}", id),
            timestamp: chrono::Utc::now(),
            embed_count: 0,
            attachments: Vec::new(),
        })
        .collect()
}

/// Tests the full close of a claimed ticket twelve minutes after it was opened.
///
/// Verifies the audit log content, the transcript file, marker role removal, snapshot
/// cleanup and the delayed channel deletion, then that a second close finds nothing.
///
/// Expected: Ok with a 12 minute report, then Err(NotFound)
#[tokio::test]
async fn claimant_closes_ticket() {
    let h = harness(configured()).await;
    let ticket = h
        .service
        .open(open_param(&member(100, "Alice"), Department::General))
        .await
        .unwrap();
    let s1 = with_roles(200, "S1", &[STAFF_ROLE]);
    h.service.claim(&s1, ticket.channel_id).await.unwrap();
    backdate(&h.service, ticket.channel_id, Duration::minutes(12));
    h.gateway.set_history(ticket.channel_id, history());

    let report = h.service.close(&s1, ticket.channel_id).await.unwrap();

    assert_eq!(report.duration_minutes, 12);
    assert!(report.transcript_saved);
    assert!(report.logged);
    assert_eq!(report.closed_by, 200);

    let logs = h.gateway.sent_to(LOG_CHANNEL);
    assert_eq!(logs.len(), 1);
    let log = logs[0].to_string();
    assert!(log.contains("12 min"));
    assert!(log.contains("<@100>"));
    assert!(log.contains("<@200>"));
    assert!(log.contains("Attached"));

    let transcripts: Vec<_> = std::fs::read_dir(h.dir.path().join("transcripts"))
        .unwrap()
        .collect();
    assert_eq!(transcripts.len(), 1);

    assert!(h.gateway.calls().iter().any(|call| matches!(
        call,
        GatewayCall::RemoveMemberRole {
            user_id: 100,
            role_id: TICKET_ROLE
        }
    )));
    assert!(TicketRow::find().all(&h.db).await.unwrap().is_empty());

    assert_eq!(h.service.deletions().pending_count(), 1);
    assert_eq!(h.service.deletions().flush().await, 1);
    assert_eq!(h.gateway.deleted_channels(), vec![ticket.channel_id]);

    let again = h.service.close(&s1, ticket.channel_id).await;
    assert!(matches!(
        again,
        Err(AppError::TicketErr(TicketError::NotFound))
    ));
}

/// Tests that closing an already closed ticket has no side effects.
///
/// Expected: Err(NotFound) and no further Discord calls
#[tokio::test]
async fn closing_removed_ticket_has_no_side_effects() {
    let h = harness(configured()).await;
    let ticket = h
        .service
        .open(open_param(&member(100, "Alice"), Department::General))
        .await
        .unwrap();
    let s1 = with_roles(200, "S1", &[STAFF_ROLE]);
    h.service.close(&s1, ticket.channel_id).await.unwrap();
    h.service.deletions().flush().await;

    let calls_before = h.gateway.calls().len();
    let result = h.service.close(&s1, ticket.channel_id).await;

    assert!(matches!(
        result,
        Err(AppError::TicketErr(TicketError::NotFound))
    ));
    assert_eq!(h.gateway.calls().len(), calls_before);
    assert_eq!(h.service.deletions().pending_count(), 0);
}

/// Tests that the opener cannot close their own ticket.
///
/// Expected: Err(NotAuthorized) and the ticket stays open
#[tokio::test]
async fn opener_cannot_close() {
    let h = harness(configured()).await;
    let alice = member(100, "Alice");
    let ticket = h
        .service
        .open(open_param(&alice, Department::General))
        .await
        .unwrap();

    let result = h.service.close(&alice, ticket.channel_id).await;

    assert!(matches!(
        result,
        Err(AppError::TicketErr(TicketError::NotAuthorized(_)))
    ));
    assert!(h.service.get(ticket.channel_id).is_some());
    assert!(h.gateway.sent_to(LOG_CHANNEL).is_empty());
}

/// Tests that only the claimant or an elevated member closes a claimed ticket.
///
/// Expected: Err(NotAuthorized) for other staff, Ok for oversight
#[tokio::test]
async fn other_staff_cannot_close_claimed_ticket() {
    let h = harness(configured()).await;
    let ticket = h
        .service
        .open(open_param(&member(100, "Alice"), Department::General))
        .await
        .unwrap();
    h.service
        .claim(&with_roles(200, "S1", &[STAFF_ROLE]), ticket.channel_id)
        .await
        .unwrap();

    let s2 = with_roles(201, "S2", &[STAFF_ROLE]);
    assert!(h.service.close(&s2, ticket.channel_id).await.is_err());

    let oversight = with_roles(300, "Lead", &[OVERSIGHT_ROLE]);
    let report = h.service.close(&oversight, ticket.channel_id).await.unwrap();
    assert_eq!(report.ticket.claimed_by, Some(200));
}

/// Tests a close where the channel history cannot be fetched.
///
/// Expected: Ok with no transcript, audit log still posted
#[tokio::test]
async fn transcript_failure_is_tolerated() {
    let h = harness(configured()).await;
    let ticket = h
        .service
        .open(open_param(&member(100, "Alice"), Department::General))
        .await
        .unwrap();
    h.gateway.fail_on(FailOn::FetchHistory);

    let report = h
        .service
        .close(&with_roles(200, "S1", &[STAFF_ROLE]), ticket.channel_id)
        .await
        .unwrap();

    assert!(!report.transcript_saved);
    assert!(report.logged);
    let log = h.gateway.sent_to(LOG_CHANNEL)[0].to_string();
    assert!(log.contains("Unavailable"));
    assert!(log.contains("Unclaimed"));
}

/// Tests a close when no log channel is configured.
///
/// Expected: Ok with `logged` false and the channel still scheduled for deletion
#[tokio::test]
async fn close_without_log_channel() {
    let h = harness(GuildConfig {
        log_channel_id: None,
        ..configured()
    })
    .await;
    let ticket = h
        .service
        .open(open_param(&member(100, "Alice"), Department::General))
        .await
        .unwrap();

    let report = h
        .service
        .close(&with_roles(200, "S1", &[STAFF_ROLE]), ticket.channel_id)
        .await
        .unwrap();

    assert!(!report.logged);
    assert_eq!(h.service.deletions().pending_count(), 1);
}

/// Tests two closes racing on the same ticket.
///
/// Expected: one Ok and one Err(NotFound), a single audit log entry
#[tokio::test]
async fn concurrent_closes_close_once() {
    let h = harness(configured()).await;
    let ticket = h
        .service
        .open(open_param(&member(100, "Alice"), Department::General))
        .await
        .unwrap();
    let s1 = with_roles(200, "S1", &[STAFF_ROLE]);
    let admin = Actor {
        is_admin: true,
        ..member(1, "Admin")
    };

    let (first, second) = tokio::join!(
        h.service.close(&s1, ticket.channel_id),
        h.service.close(&admin, ticket.channel_id)
    );

    assert_eq!([first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(), 1);
    assert_eq!(h.gateway.sent_to(LOG_CHANNEL).len(), 1);
}

/// Tests that the audit log carries the priority of the closed ticket.
///
/// Expected: Ok with the priority label in the log embed
#[tokio::test]
async fn audit_log_includes_priority() {
    let h = harness(configured()).await;
    let mut param = open_param(&member(100, "Alice"), Department::InternalAffairs);
    param.priority = Some(Priority::Urgent);
    let ticket = h.service.open(param).await.unwrap();

    h.service
        .close(&with_roles(200, "IA", &[IA_ROLE]), ticket.channel_id)
        .await
        .unwrap();

    let log = h.gateway.sent_to(LOG_CHANNEL)[0].to_string();
    assert!(log.contains("Urgent"));
    assert!(log.contains("Internal Affairs"));
}

/// Tests a claim whose snapshot write lands after the ticket was closed.
///
/// The claim is applied to the registry, the ticket is closed, and only then is the
/// claimed state written. After a restart the closed ticket must not come back.
///
/// Expected: no stored row, nothing restored and the opener can open again
#[tokio::test]
async fn late_snapshot_write_does_not_revive_closed_ticket() {
    let h = harness(configured()).await;
    let alice = member(100, "Alice");
    let ticket = h
        .service
        .open(open_param(&alice, Department::General))
        .await
        .unwrap();
    let s1 = with_roles(200, "S1", &[STAFF_ROLE]);

    let claimed = h.service.registry().claim(ticket.channel_id, 200).unwrap();
    h.service.close(&s1, ticket.channel_id).await.unwrap();
    h.service.persist(&claimed).await;

    assert!(TicketRow::find().all(&h.db).await.unwrap().is_empty());

    let service = restarted(&h);
    assert_eq!(service.restore().await.unwrap(), 0);

    let reopened = service.open(open_param(&alice, Department::General)).await;
    assert!(reopened.is_ok());
}
