use super::*;

/// Replaces the store's directory with a plain file so every later flush fails.
async fn break_store_dir(dir: &std::path::Path) {
    tokio::fs::remove_dir_all(dir).await.unwrap();
    tokio::fs::write(dir, "").await.unwrap();
}

/// Tests that a successful update is applied in memory and on disk.
///
/// Expected: Ok with the closure's result, new value visible both ways
#[tokio::test]
async fn applies_and_persists_change() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild(
            1000,
            GuildDocFactory::new()
                .user(42, UserDocFactory::new().gold(10).build())
                .build(),
        )
        .build()
        .await
        .unwrap();
    let db = Database::open(&test.db_path).await?;

    let gold = db
        .update_user(1000, 42, |user| {
            user.gold += 500;
            user.gold
        })
        .await?;

    assert_eq!(gold, 510);
    assert_eq!(db.get_user(1000, 42).await?.gold, 510);
    let doc = test.read_document().await.unwrap();
    assert_eq!(doc["1000"]["users"]["42"]["gold"], json!(510));

    Ok(())
}

/// Tests that an update whose flush fails is discarded.
///
/// Verifies that the in-memory record keeps its previous value when the snapshot cannot be
/// written, so memory never runs ahead of the file.
///
/// Expected: Err, and the record still reads its old gold
#[tokio::test]
async fn discards_change_when_flush_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let store_dir = test.dir.path().join("sub");
    let db = Database::open(store_dir.join("database.json")).await?;
    db.update_user(1000, 42, |user| user.gold = 10).await?;

    break_store_dir(&store_dir).await;
    let result = db.update_user(1000, 42, |user| user.gold += 500).await;

    assert!(matches!(result, Err(AppError::StoreErr(_))));
    assert_eq!(db.get_user(1000, 42).await?.gold, 10);

    Ok(())
}

/// Tests that a guild update whose flush fails is discarded.
///
/// Expected: Err, and the guild keeps its old log channel
#[tokio::test]
async fn discards_guild_change_when_flush_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let store_dir = test.dir.path().join("sub");
    let db = Database::open(store_dir.join("database.json")).await?;
    db.update_guild(1000, |guild| guild.log_channel = Some("555".to_string()))
        .await?;

    break_store_dir(&store_dir).await;
    let result = db
        .update_guild(1000, |guild| guild.log_channel = Some("777".to_string()))
        .await;

    assert!(result.is_err());
    assert_eq!(db.get_guild(1000).await?.log_channel.as_deref(), Some("555"));

    Ok(())
}

/// Tests that lazily creating a user is not kept when its flush fails.
///
/// Expected: Err, and no user is enumerated afterwards
#[tokio::test]
async fn discards_created_user_when_flush_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let store_dir = test.dir.path().join("sub");
    let db = Database::open(store_dir.join("database.json")).await?;
    db.get_guild(1000).await?;

    break_store_dir(&store_dir).await;
    let result = db.get_user(1000, 42).await;

    assert!(result.is_err());
    assert!(db.users().await.is_empty());

    Ok(())
}
