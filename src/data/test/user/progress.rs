use super::*;

/// Tests reading the streak, tier and last claim of a stored member.
///
/// Expected: Ok with the stored values
#[tokio::test]
async fn reads_progress_fields() -> Result<(), AppError> {
    let claimed = Utc::now() - Duration::days(1);
    let test = TestBuilder::new()
        .with_guild(
            1000,
            GuildDocFactory::new()
                .user(
                    42,
                    UserDocFactory::new()
                        .streak(4)
                        .tier(2)
                        .last_daily_claim(claimed)
                        .build(),
                )
                .build(),
        )
        .build()
        .await
        .unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = UserRepository::new(&db);

    assert_eq!(repo.get_streak(1000, 42).await?, 4);
    assert_eq!(repo.get_tier(1000, 42).await?, 2);
    let stored = repo.get_last_daily_claim(1000, 42).await?.unwrap();
    assert_eq!(
        crate::util::time::parse_timestamp(&stored).map(|at| at.timestamp()),
        Some(claimed.timestamp())
    );

    Ok(())
}

/// Tests that a fresh member starts at tier 1 with no streak and no claim.
///
/// Expected: Ok with default progress fields
#[tokio::test]
async fn defaults_progress_for_new_member() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = UserRepository::new(&db);

    assert_eq!(repo.get_streak(1000, 7).await?, 0);
    assert_eq!(repo.get_tier(1000, 7).await?, 1);
    assert_eq!(repo.get_last_daily_claim(1000, 7).await?, None);

    Ok(())
}

/// Tests that progress writes persist across reopening the store.
///
/// Expected: Ok with the written values read back from disk
#[tokio::test]
async fn persists_progress_writes() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let claimed = Utc::now();
    {
        let db = Database::open(&test.db_path).await?;
        let repo = UserRepository::new(&db);
        repo.set_streak(1000, 42, 9).await?;
        repo.set_tier(1000, 42, 3).await?;
        repo.set_last_daily_claim(1000, 42, claimed).await?;
    }

    let db = Database::open(&test.db_path).await?;
    let repo = UserRepository::new(&db);

    assert_eq!(repo.get_streak(1000, 42).await?, 9);
    assert_eq!(repo.get_tier(1000, 42).await?, 3);
    assert!(repo.get_last_daily_claim(1000, 42).await?.is_some());

    Ok(())
}
