use super::*;

/// Tests inserting a snapshot row for a new ticket.
///
/// Verifies that ids are stored as text and enums as their slugs.
///
/// Expected: Ok with one row matching the ticket
#[tokio::test]
async fn inserts_new_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let mut ticket = sample_ticket(1001);
    ticket.department = Department::InternalAffairs;
    ticket.priority = Some(Priority::High);

    let repo = TicketRepository::new(db);
    let stored = repo.upsert(&ticket).await?;

    assert_eq!(stored.channel_id, "1001");
    assert_eq!(stored.department, "internal-affairs");
    assert_eq!(stored.priority, Some("high".to_string()));
    assert_eq!(stored.claimed_by, None);

    let rows = entity::prelude::Ticket::find().all(db).await?;
    assert_eq!(rows.len(), 1);

    Ok(())
}

/// Tests upserting an existing ticket after it was claimed.
///
/// Verifies that the existing row is updated in place rather than duplicated.
///
/// Expected: Ok with a single row holding the claim and new priority
#[tokio::test]
async fn updates_existing_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let mut ticket = sample_ticket(1002);
    repo.upsert(&ticket).await?;

    ticket.claimed_by = Some(77);
    ticket.priority = Some(Priority::Urgent);
    let stored = repo.upsert(&ticket).await?;

    assert_eq!(stored.claimed_by, Some("77".to_string()));
    assert_eq!(stored.priority, Some("urgent".to_string()));

    let rows = entity::prelude::Ticket::find().all(db).await?;
    assert_eq!(rows.len(), 1);

    Ok(())
}
