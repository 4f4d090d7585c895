use super::*;

/// Tests setting and clearing a timed effect expiry.
///
/// Expected: Ok with the expiry stored as a timestamp and then cleared to None
#[tokio::test]
async fn sets_and_clears_expiry() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = UserRepository::new(&db);
    let expiry = Utc::now() + Duration::hours(1);

    repo.set_effect_expiry(1000, 42, EffectKind::Mimic, Some(expiry))
        .await?;

    let stored = repo
        .get_effect_expiry(1000, 42, EffectKind::Mimic)
        .await?
        .unwrap();
    assert_eq!(crate::util::time::parse_timestamp(&stored), Some(expiry));
    assert_eq!(
        repo.get_effect_expiry(1000, 42, EffectKind::Barrel).await?,
        None
    );

    repo.set_effect_expiry(1000, 42, EffectKind::Mimic, None)
        .await?;

    assert_eq!(
        repo.get_effect_expiry(1000, 42, EffectKind::Mimic).await?,
        None
    );

    Ok(())
}
