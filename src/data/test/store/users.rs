use super::*;

/// Tests enumerating all users across guilds.
///
/// Expected: Ok with one entry per stored user carrying its guild and user ids
#[tokio::test]
async fn enumerates_all_guilds() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild(
            1000,
            GuildDocFactory::new()
                .user(1, UserDocFactory::new().gold(10).build())
                .user(2, UserDocFactory::new().gold(20).build())
                .build(),
        )
        .with_guild(
            2000,
            GuildDocFactory::new()
                .user(1, UserDocFactory::new().gold(30).build())
                .build(),
        )
        .build()
        .await
        .unwrap();
    let db = Database::open(&test.db_path).await?;

    let mut entries: Vec<(u64, u64, i64)> = db
        .users()
        .await
        .into_iter()
        .map(|e| (e.guild_id, e.user_id, e.record.gold))
        .collect();
    entries.sort();

    assert_eq!(entries, vec![(1000, 1, 10), (1000, 2, 20), (2000, 1, 30)]);

    Ok(())
}

/// Tests that records with non-numeric keys are skipped instead of failing enumeration.
///
/// Expected: Ok with only the valid record returned
#[tokio::test]
async fn skips_invalid_keys() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_raw(
            json!({
                "1000": GuildDocFactory::new()
                    .user(1, UserDocFactory::new().build())
                    .build(),
                "not-a-guild": GuildDocFactory::new()
                    .user(2, UserDocFactory::new().build())
                    .build(),
            })
            .to_string(),
        )
        .build()
        .await
        .unwrap();
    let db = Database::open(&test.db_path).await?;

    let entries = db.users().await;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].guild_id, 1000);

    Ok(())
}
