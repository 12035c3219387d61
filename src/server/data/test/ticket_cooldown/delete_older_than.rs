use super::*;

/// Tests sweeping expired cooldown entries.
///
/// Verifies that entries before the cutoff are removed and recent ones are kept.
///
/// Expected: Ok(1) with only the recent entry remaining
#[tokio::test]
async fn deletes_expired_entries() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::create_cooldown(db, "1", now - Duration::minutes(10)).await?;
    factory::create_cooldown(db, "2", now - Duration::seconds(5)).await?;

    let repo = TicketCooldownRepository::new(db);
    let deleted = repo.delete_older_than(now - Duration::minutes(1)).await?;

    assert_eq!(deleted, 1);
    let rows = repo.get_all().await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, "2");

    Ok(())
}
