use super::*;

/// Tests lazily creating a user record in an unknown guild.
///
/// Expected: Ok with default user record, guild and user present on disk
#[tokio::test]
async fn creates_missing_user_and_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let db = Database::open(&test.db_path).await?;

    let user = db.get_user(3000, 42).await?;

    assert_eq!(user.tier, 1);
    assert_eq!(user.gold, 0);
    assert!(user.warnings.is_empty());

    let doc = test.read_document().await.unwrap();
    assert_eq!(doc["3000"]["users"]["42"]["tier"], json!(1));

    Ok(())
}

/// Tests that updates are visible to later reads and survive a reopen.
///
/// Expected: Ok with the updated value read back from a fresh store
#[tokio::test]
async fn update_persists_across_reopen() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();

    {
        let db = Database::open(&test.db_path).await?;
        db.update_user(3000, 42, |user| user.gold = 900).await?;
        assert_eq!(db.get_user(3000, 42).await?.gold, 900);
    }

    let reopened = Database::open(&test.db_path).await?;
    assert_eq!(reopened.get_user(3000, 42).await?.gold, 900);

    Ok(())
}
