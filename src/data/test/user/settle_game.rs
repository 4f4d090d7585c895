use super::*;

/// Tests settling a won game.
///
/// Expected: Ok with gold credited once and only the win counter incremented
#[tokio::test]
async fn credits_win() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild(
            1000,
            GuildDocFactory::new()
                .user(42, UserDocFactory::new().gold(100).build())
                .build(),
        )
        .build()
        .await
        .unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = UserRepository::new(&db);

    let user = repo
        .settle_game(1000, 42, GameKind::Roulette, 20, true)
        .await?;

    assert_eq!(user.gold, 120);
    assert_eq!(user.record(GameKind::Roulette), (1, 0));
    assert_eq!(user.record(GameKind::Blackjack), (0, 0));

    Ok(())
}

/// Tests settling a lost game.
///
/// Expected: Ok with the bet debited once and only the loss counter incremented
#[tokio::test]
async fn debits_loss() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = UserRepository::new(&db);

    let user = repo
        .settle_game(1000, 42, GameKind::Slots, -15, false)
        .await?;

    assert_eq!(user.gold, -15);
    assert_eq!(user.record(GameKind::Slots), (0, 1));

    Ok(())
}
