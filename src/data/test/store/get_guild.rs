use super::*;

/// Tests lazily creating a guild record.
///
/// Verifies that fetching an unknown guild creates it with the default schema and persists
/// the creation immediately.
///
/// Expected: Ok with default record, present on disk
#[tokio::test]
async fn creates_missing_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let db = Database::open(&test.db_path).await?;

    let guild = db.get_guild(2000).await?;

    assert_eq!(guild.general_channel, None);
    assert!(guild.users.is_empty());

    let doc = test.read_document().await.unwrap();
    assert!(doc.get("2000").is_some());
    assert!(doc["2000"].get("last_intro_id").is_some());

    Ok(())
}

/// Tests fetching an existing guild record.
///
/// Expected: Ok with the stored configuration
#[tokio::test]
async fn returns_existing_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild(2000, GuildDocFactory::new().log_channel(555).build())
        .build()
        .await
        .unwrap();
    let db = Database::open(&test.db_path).await?;

    let guild = db.get_guild(2000).await?;

    assert_eq!(guild.log_channel.as_deref(), Some("555"));

    Ok(())
}
