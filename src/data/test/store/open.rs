use super::*;

/// Tests opening a store whose document does not exist yet.
///
/// Verifies that a missing file is treated as an empty store rather than an error.
///
/// Expected: Ok with no users
#[tokio::test]
async fn opens_missing_document_as_empty() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();

    let db = Database::open(&test.db_path).await?;

    assert!(db.users().await.is_empty());

    Ok(())
}

/// Tests opening an empty file.
///
/// Expected: Ok with no users
#[tokio::test]
async fn opens_empty_file_as_empty() -> Result<(), AppError> {
    let test = TestBuilder::new().with_raw("").build().await.unwrap();

    let db = Database::open(&test.db_path).await?;

    assert!(db.users().await.is_empty());

    Ok(())
}

/// Tests opening a document that is not valid JSON.
///
/// Verifies that corruption is surfaced instead of silently starting from an empty store,
/// which would overwrite the corrupt document on the next write.
///
/// Expected: Err(StoreErr)
#[tokio::test]
async fn rejects_corrupt_document() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_raw("{ \"123\": ")
        .build()
        .await
        .unwrap();

    let result = Database::open(&test.db_path).await;

    assert!(matches!(result, Err(AppError::StoreErr(_))));

    Ok(())
}

/// Tests importing the legacy table layout.
///
/// Verifies that rows of the `_default` table are re-keyed by their guild id.
///
/// Expected: Ok with the user record reachable under the guild id
#[tokio::test]
async fn imports_legacy_table_layout() -> Result<(), AppError> {
    let legacy = json!({
        "_default": {
            "1": {
                "guild_id": "4000",
                "data": GuildDocFactory::new()
                    .user(77, UserDocFactory::new().gold(320).build())
                    .build()
            }
        }
    });
    let test = TestBuilder::new()
        .with_raw(legacy.to_string())
        .build()
        .await
        .unwrap();

    let db = Database::open(&test.db_path).await?;

    let user = db.get_user(4000, 77).await?;
    assert_eq!(user.gold, 320);

    Ok(())
}
