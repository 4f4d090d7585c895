use super::*;

/// Tests applying a typed administrative override.
///
/// Expected: Ok with only the targeted field changed
#[tokio::test]
async fn applies_override() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild(
            1000,
            GuildDocFactory::new()
                .user(42, UserDocFactory::new().gold(10).streak(2).build())
                .build(),
        )
        .build()
        .await
        .unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = UserRepository::new(&db);

    repo.set_field(1000, 42, UserField::parse("streak", "9")?)
        .await?;

    let user = repo.get(1000, 42).await?;
    assert_eq!(user.streak, 9);
    assert_eq!(user.gold, 10);

    Ok(())
}
