use super::*;

/// Tests that a saved configuration loads back unchanged.
///
/// Verifies that every id, including snowflakes above 2^53, survives the round trip.
///
/// Expected: Ok with identical ids
#[tokio::test]
async fn round_trips_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let store = GuildConfigStore::new(dir.path().join("guild_config.json"));

    let config = GuildConfig {
        log_channel_id: Some(1472277307002589216),
        staff_role_id: Some(1472277307002589217),
        internal_affairs_role_id: Some(3),
        management_role_id: None,
        partnership_role_id: Some(5),
        oversight_role_id: Some(6),
        ticket_role_id: Some(7),
        category_id: None,
        blocked_role_ids: vec![8, 9],
    };

    store.save(&config).await.unwrap();
    let loaded = store.load().await.unwrap();

    assert_eq!(loaded, config);
}

/// Tests that saving replaces the previous record wholesale.
///
/// Expected: Ok with settings absent from the new record unset
#[tokio::test]
async fn overwrites_previous_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = GuildConfigStore::new(dir.path().join("nested").join("guild_config.json"));

    store
        .save(&GuildConfig {
            log_channel_id: Some(1),
            staff_role_id: Some(2),
            oversight_role_id: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();
    store
        .save(&GuildConfig {
            log_channel_id: Some(10),
            staff_role_id: Some(20),
            ..Default::default()
        })
        .await
        .unwrap();

    let loaded = store.load().await.unwrap();

    assert_eq!(loaded.log_channel_id, Some(10));
    assert_eq!(loaded.oversight_role_id, None);
}
