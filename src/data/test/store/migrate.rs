use super::*;

/// Tests that migration backfills missing guild and user fields on disk.
///
/// Expected: Ok with every default field present in the flushed document
#[tokio::test]
async fn backfills_missing_fields() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild(
            1000,
            GuildDocFactory::new()
                .without("mute_role")
                .without("colour_channel")
                .user(
                    42,
                    UserDocFactory::new()
                        .gold(55)
                        .without("streak")
                        .without("barrel_expiry")
                        .build(),
                )
                .build(),
        )
        .build()
        .await
        .unwrap();

    let db = Database::open(&test.db_path).await?;
    let users = db.migrate().await?;

    assert_eq!(users, 1);

    let doc = test.read_document().await.unwrap();
    let guild = &doc["1000"];
    assert!(guild.get("mute_role").is_some_and(|v| v.is_null()));
    assert!(guild.get("colour_channel").is_some_and(|v| v.is_null()));

    let user = &guild["users"]["42"];
    assert_eq!(user["gold"], json!(55));
    assert_eq!(user["streak"], json!(0));
    assert!(user.get("barrel_expiry").is_some_and(|v| v.is_null()));

    Ok(())
}

/// Tests that a legacy integer warning count is replaced by an empty list.
///
/// Expected: Ok with `warnings` written as `[]`
#[tokio::test]
async fn replaces_legacy_warning_count() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild(
            1000,
            GuildDocFactory::new()
                .user(42, UserDocFactory::new().raw_field("warnings", json!(2)).build())
                .build(),
        )
        .build()
        .await
        .unwrap();

    let db = Database::open(&test.db_path).await?;
    db.migrate().await?;

    let doc = test.read_document().await.unwrap();
    assert_eq!(doc["1000"]["users"]["42"]["warnings"], json!([]));

    Ok(())
}

/// Tests migration idempotence.
///
/// Verifies that migrating an already migrated document leaves it byte-for-byte unchanged,
/// including after reopening the store from disk.
///
/// Expected: Ok with identical document text after each run
#[tokio::test]
async fn is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild(
            1000,
            GuildDocFactory::new()
                .colour_role(9, "Teal")
                .user(42, UserDocFactory::new().without("tier").build())
                .user(43, UserDocFactory::new().raw_field("warnings", json!(1)).build())
                .build(),
        )
        .build()
        .await
        .unwrap();

    let db = Database::open(&test.db_path).await?;
    db.migrate().await?;
    let first = test.read_raw().await.unwrap();

    db.migrate().await?;
    let second = test.read_raw().await.unwrap();

    let reopened = Database::open(&test.db_path).await?;
    reopened.migrate().await?;
    let third = test.read_raw().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);

    Ok(())
}
