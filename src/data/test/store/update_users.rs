use super::*;

/// Tests a batch update across every stored user.
///
/// Expected: Ok with the modified count and each record changed on disk
#[tokio::test]
async fn updates_every_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild(
            1000,
            GuildDocFactory::new()
                .user(1, UserDocFactory::new().gold(5).build())
                .user(2, UserDocFactory::new().gold(-5).build())
                .build(),
        )
        .build()
        .await
        .unwrap();
    let db = Database::open(&test.db_path).await?;

    let modified = db
        .update_users(|_, _, user| {
            if user.gold < 0 {
                user.gold = 0;
                true
            } else {
                false
            }
        })
        .await?;

    assert_eq!(modified, 1);
    let doc = test.read_document().await.unwrap();
    assert_eq!(doc["1000"]["users"]["2"]["gold"], json!(0));
    assert_eq!(doc["1000"]["users"]["1"]["gold"], json!(5));

    Ok(())
}

/// Tests that a batch update whose flush fails leaves every record as it was.
///
/// Expected: Err, and the stored gold is unchanged in memory
#[tokio::test]
async fn discards_batch_when_flush_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let store_dir = test.dir.path().join("sub");
    let db = Database::open(store_dir.join("database.json")).await?;
    db.update_user(1000, 42, |user| user.gold = -5).await?;

    tokio::fs::remove_dir_all(&store_dir).await.unwrap();
    tokio::fs::write(&store_dir, "").await.unwrap();
    let result = db
        .update_users(|_, _, user| {
            user.gold = 0;
            true
        })
        .await;

    assert!(result.is_err());
    assert_eq!(db.get_user(1000, 42).await?.gold, -5);

    Ok(())
}
