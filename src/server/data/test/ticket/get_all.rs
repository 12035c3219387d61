use super::*;

/// Tests loading every stored ticket.
///
/// Verifies that rows come back ordered by start time and convert into tickets.
///
/// Expected: Ok with the older ticket first
#[tokio::test]
async fn returns_tickets_oldest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::ticket::TicketFactory::new(db)
        .channel_id("2002")
        .start_time(now)
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db)
        .channel_id("2001")
        .department("partnership")
        .claimed_by("55")
        .start_time(now - Duration::minutes(30))
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let rows = repo.get_all().await?;

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].channel_id, "2001");

    let ticket = Ticket::from_entity(rows[0].clone()).unwrap();
    assert_eq!(ticket.department, Department::Partnership);
    assert_eq!(ticket.claimed_by, Some(55));

    Ok(())
}

/// Tests loading from an empty table.
///
/// Expected: Ok with no rows
#[tokio::test]
async fn returns_empty_when_no_tickets() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let rows = repo.get_all().await?;

    assert!(rows.is_empty());

    Ok(())
}
