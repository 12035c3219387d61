use super::*;

/// Tests deleting the snapshot row of a closed ticket.
///
/// Verifies that only the row for the given channel is removed.
///
/// Expected: Ok(true) and the other ticket remains
#[tokio::test]
async fn deletes_matching_row() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .channel_id("3001")
        .build()
        .await?;
    factory::create_ticket(db).await?;

    let repo = TicketRepository::new(db);
    let deleted = repo.delete_by_channel_id(3001).await?;

    assert!(deleted);
    let rows = entity::prelude::Ticket::find().all(db).await?;
    assert_eq!(rows.len(), 1);
    assert_ne!(rows[0].channel_id, "3001");

    Ok(())
}

/// Tests deleting a channel that has no row.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_when_missing() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let deleted = repo.delete_by_channel_id(404).await?;

    assert!(!deleted);

    Ok(())
}
