use super::*;

/// Tests setting the bump and mute roles.
///
/// Expected: Ok with each role read back independently
#[tokio::test]
async fn sets_bump_and_mute_roles() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = GuildConfigRepository::new(&db);

    repo.set_role(1000, RoleKind::Bump, 11).await?;
    repo.set_role(1000, RoleKind::Mute, 12).await?;

    assert_eq!(repo.get_role(1000, RoleKind::Bump).await?, Some(11));
    assert_eq!(repo.get_role(1000, RoleKind::Mute).await?, Some(12));

    Ok(())
}

/// Tests tier role accessors.
///
/// Expected: Ok for tiers 1 to 3, BadRequest for tier 4
#[tokio::test]
async fn sets_tier_roles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild(1000, GuildDocFactory::new().tier_role(1, 21).build())
        .build()
        .await
        .unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = GuildConfigRepository::new(&db);

    repo.set_tier_role(1000, 3, 23).await?;

    assert_eq!(repo.get_tier_role(1000, 1).await?, Some(21));
    assert_eq!(repo.get_tier_role(1000, 2).await?, None);
    assert_eq!(repo.get_tier_role(1000, 3).await?, Some(23));
    assert!(matches!(
        repo.set_tier_role(1000, 4, 24).await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}

/// Tests that a corrupt stored role id is reported.
///
/// Expected: Err(InternalErr)
#[tokio::test]
async fn corrupt_role_id_is_error() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_raw(r#"{ "1000": { "mute_role": "muted" } }"#)
        .build()
        .await
        .unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = GuildConfigRepository::new(&db);

    let result = repo.get_role(1000, RoleKind::Mute).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
