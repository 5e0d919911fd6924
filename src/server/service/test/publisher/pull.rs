use super::*;

/// Tests that the online list is pulled as a set of trimmed codes.
#[tokio::test]
async fn pulls_online_codes() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_remote_file("ids.txt", " 1111222233334444 \n\n5555666677778888\n")
        .build()
        .await
        .unwrap();
    let publisher = publisher_for(&test);

    let online = publisher.pull_online_codes().await?.unwrap();

    assert_eq!(online.len(), 2);
    assert!(online.contains("1111222233334444"));
    assert!(online.contains("5555666677778888"));

    Ok(())
}

/// Tests that missing remote files pull as `None`.
#[tokio::test]
async fn missing_files_pull_as_none() -> Result<(), AppError> {
    let test = TestBuilder::new().with_github().build().await.unwrap();
    let publisher = publisher_for(&test);

    assert!(publisher.pull_registry().await?.is_none());
    assert!(publisher.pull_online_codes().await?.is_none());

    Ok(())
}

/// Tests that a corrupt remote registry is reported rather than replacing local state.
#[tokio::test]
async fn corrupt_remote_registry_is_an_error() {
    let test = TestBuilder::new()
        .with_remote_file("users.json", "{ not json")
        .build()
        .await
        .unwrap();
    let publisher = publisher_for(&test);

    assert!(matches!(
        publisher.pull_registry().await,
        Err(AppError::JsonErr(_))
    ));
}
