use super::*;

/// Tests loading when no config file has been written yet.
///
/// Expected: Ok with every setting unset
#[tokio::test]
async fn returns_default_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let store = GuildConfigStore::new(dir.path().join("guild_config.json"));

    let config = store.load().await.unwrap();

    assert_eq!(config, GuildConfig::default());
}

/// Tests loading a file that is not valid JSON.
///
/// Expected: Err(GuildConfigParse)
#[tokio::test]
async fn fails_on_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guild_config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = GuildConfigStore::new(path);
    let result = store.load().await;

    assert!(matches!(result, Err(ConfigError::GuildConfigParse { .. })));
}
