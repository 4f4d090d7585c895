use super::*;

/// Tests that gold changes sum algebraically with no floor at zero.
///
/// Verifies the ledger keeps debiting past zero, so a balance can go negative when a
/// debit path does not check funds first.
///
/// Expected: Ok with final balance equal to the sum of all deltas
#[tokio::test]
async fn sums_deltas_without_floor() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = UserRepository::new(&db);

    repo.add_gold(1000, 42, 100).await?;
    repo.remove_gold(1000, 42, 250).await?;
    repo.add_gold(1000, 42, 30).await?;
    let balance = repo.remove_gold(1000, 42, 5).await?;

    assert_eq!(balance, -125);
    assert_eq!(repo.get_gold(1000, 42).await?, -125);

    Ok(())
}

/// Tests setting the balance directly.
///
/// Expected: Ok with balance overwritten
#[tokio::test]
async fn sets_gold() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild(
            1000,
            GuildDocFactory::new()
                .user(42, UserDocFactory::new().gold(70).build())
                .build(),
        )
        .build()
        .await
        .unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = UserRepository::new(&db);

    repo.set_gold(1000, 42, 5).await?;

    assert_eq!(repo.get_gold(1000, 42).await?, 5);

    Ok(())
}
