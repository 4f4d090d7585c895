use super::*;

/// Tests setting and reading back every channel slot.
///
/// Verifies each kind writes to its own slot without touching the others.
///
/// Expected: Ok with each channel id read back from its own slot
#[tokio::test]
async fn sets_each_channel_kind() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = GuildConfigRepository::new(&db);

    for (offset, kind) in ChannelKind::ALL.into_iter().enumerate() {
        repo.set_channel(1000, kind, 500 + offset as u64).await?;
    }

    for (offset, kind) in ChannelKind::ALL.into_iter().enumerate() {
        assert_eq!(repo.get_channel(1000, kind).await?, Some(500 + offset as u64));
    }

    Ok(())
}

/// Tests reading an unconfigured channel.
///
/// Expected: Ok(None)
#[tokio::test]
async fn unconfigured_channel_is_none() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = GuildConfigRepository::new(&db);

    assert_eq!(repo.get_channel(1000, ChannelKind::Whisper).await?, None);

    Ok(())
}

/// Tests storing and clearing the sticky intro message id.
///
/// Expected: Ok with the id stored then cleared
#[tokio::test]
async fn tracks_last_intro_id() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = GuildConfigRepository::new(&db);

    repo.set_last_intro_id(1000, Some(8888)).await?;
    assert_eq!(repo.get_last_intro_id(1000).await?, Some(8888));

    repo.set_last_intro_id(1000, None).await?;
    assert_eq!(repo.get_last_intro_id(1000).await?, None);

    Ok(())
}
