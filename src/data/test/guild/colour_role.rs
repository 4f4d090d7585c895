use super::*;

/// Tests registering, listing and removing colour roles.
///
/// Expected: Ok with roles listed by name and removal reported
#[tokio::test]
async fn manages_colour_roles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild(1000, GuildDocFactory::new().colour_role(31, "teal").build())
        .build()
        .await
        .unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = GuildConfigRepository::new(&db);

    repo.add_colour_role(1000, 32, "Amber").await?;

    assert_eq!(
        repo.get_colour_roles(1000).await?,
        vec![(32, "Amber".to_string()), (31, "teal".to_string())]
    );

    assert!(repo.remove_colour_role(1000, 31).await?);
    assert!(!repo.remove_colour_role(1000, 31).await?);
    assert_eq!(repo.get_colour_roles(1000).await?.len(), 1);

    Ok(())
}

/// Tests looking up a colour role by name.
///
/// Expected: Ok with a case-insensitive match, None for unknown names
#[tokio::test]
async fn finds_colour_role_by_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_guild(1000, GuildDocFactory::new().colour_role(31, "Teal").build())
        .build()
        .await
        .unwrap();
    let db = Database::open(&test.db_path).await?;
    let repo = GuildConfigRepository::new(&db);

    assert_eq!(repo.find_colour_role(1000, "teal").await?, Some(31));
    assert_eq!(repo.find_colour_role(1000, "Maroon").await?, None);

    Ok(())
}
