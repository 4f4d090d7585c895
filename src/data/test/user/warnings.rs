use super::*;

/// Tests appending warnings.
///
/// Expected: Ok with warnings kept in issue order
#[tokio::test]
async fn appends_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new().without_document().build().await.unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = UserRepository::new(&db);

    repo.add_warning(
        1000,
        42,
        Warning {
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
            reason: "spam".to_string(),
        },
    )
    .await?;
    let count = repo
        .add_warning(
            1000,
            42,
            Warning {
                timestamp: "2024-01-02T00:00:00+00:00".to_string(),
                reason: "caps".to_string(),
            },
        )
        .await?;

    assert_eq!(count, 2);
    let reasons: Vec<String> = repo
        .get_warnings(1000, 42)
        .await?
        .into_iter()
        .map(|w| w.reason)
        .collect();
    assert_eq!(reasons, vec!["spam", "caps"]);

    Ok(())
}
