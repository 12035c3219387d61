use super::*;

/// Tests recording a user's first ticket opening.
///
/// Expected: Ok with a row for the user
#[tokio::test]
async fn inserts_new_cooldown() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let repo = TicketCooldownRepository::new(db);
    let stored = repo.upsert(42, now).await?;

    assert_eq!(stored.user_id, "42");
    assert_eq!(stored.last_opened_at.timestamp(), now.timestamp());

    Ok(())
}

/// Tests recording a second opening for the same user.
///
/// Verifies that the timestamp is replaced rather than a second row being added.
///
/// Expected: Ok with a single row holding the newer timestamp
#[tokio::test]
async fn replaces_existing_cooldown() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::create_cooldown(db, "42", now - Duration::hours(2)).await?;

    let repo = TicketCooldownRepository::new(db);
    repo.upsert(42, now).await?;

    let rows = entity::prelude::TicketCooldown::find().all(db).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].last_opened_at.timestamp(), now.timestamp());

    Ok(())
}
