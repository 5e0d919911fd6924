use super::*;

/// Tests that republishing writes the sorted online set to both paths.
///
/// Expected: both files hold the online codes in order, offline codes excluded
#[tokio::test]
async fn writes_sorted_online_codes_to_both_paths() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(
            UserFactory::new()
                .friend_code("9999000011112222")
                .online()
                .build(),
        )
        .with_user(
            UserFactory::new()
                .friend_code("1111222233334444")
                .secondary_friend_code("5555666677778888")
                .online()
                .secondary_online()
                .build(),
        )
        .with_user(UserFactory::new().friend_code("3333444455556666").build())
        .with_github()
        .build()
        .await
        .unwrap();
    let publisher = publisher_for(&test);

    publisher.republish(&load(&test).await).await;

    let expected = "1111222233334444\n5555666677778888\n9999000011112222";
    let repo = test.repo().unwrap();
    assert_eq!(repo.text("ids.txt").as_deref(), Some(expected));
    assert_eq!(repo.text("online.txt").as_deref(), Some(expected));
    assert!(repo
        .commits_for("ids.txt")
        .iter()
        .all(|commit| commit.message.contains("[skip ci]")));

    Ok(())
}

/// Tests that an existing file is overwritten using its current revision, and that an
/// identical republish commits nothing.
#[tokio::test]
async fn updates_existing_file_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(
            UserFactory::new()
                .friend_code("1111222233334444")
                .online()
                .build(),
        )
        .with_remote_file("ids.txt", "0000000000000000")
        .build()
        .await
        .unwrap();
    let publisher = publisher_for(&test);
    let registry = load(&test).await;

    publisher.republish(&registry).await;
    publisher.republish(&registry).await;

    let repo = test.repo().unwrap();
    assert_eq!(repo.text("ids.txt").as_deref(), Some("1111222233334444"));
    assert_eq!(repo.commits_for("ids.txt").len(), 1);

    Ok(())
}

/// Tests that persisting writes the registry document as JSON.
#[tokio::test]
async fn persists_registry_document() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(
            UserFactory::new()
                .member_id(100)
                .friend_code("1111222233334444")
                .build(),
        )
        .with_github()
        .build()
        .await
        .unwrap();
    let publisher = publisher_for(&test);

    publisher.persist(&load(&test).await).await;

    let text = test.repo().unwrap().text("users.json").unwrap();
    let remote: serde_json::Value = serde_json::from_str(&text)?;
    assert_eq!(remote["100"]["friend_code"], "1111222233334444");

    Ok(())
}

/// Tests that a publisher without a remote store does nothing.
#[tokio::test]
async fn disabled_publisher_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(UserFactory::new().online().build())
        .build()
        .await
        .unwrap();
    let publisher = PresencePublisher::new(
        None,
        reqwest::Client::new(),
        paths(),
        VerifyConfig {
            mirror_url: None,
            interval: std::time::Duration::from_millis(1),
            attempts: 1,
            timeout: std::time::Duration::from_secs(1),
        },
    );
    let registry = load(&test).await;

    publisher.republish(&registry).await;
    publisher.persist(&registry).await;

    assert!(publisher.remote().is_none());
    assert!(publisher.pull_registry().await?.is_none());

    Ok(())
}
