use super::*;

/// Tests that a slot marked online but missing from the published list is healed.
///
/// Expected: Ok(1), local status offline, nothing republished
#[tokio::test]
async fn heals_status_missing_from_online_list() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(
            UserFactory::new()
                .member_id(100)
                .friend_code("1111222233334444")
                .online()
                .build(),
        )
        .with_remote_file("ids.txt", "")
        .build()
        .await
        .unwrap();
    let store = store_for(&test);

    let corrected = store.resync_on_startup().await?;

    assert_eq!(corrected, 1);
    assert_eq!(test.read_registry()["100"]["status"], "offline");
    assert!(test.repo().unwrap().commits().is_empty());

    Ok(())
}

/// Tests that the remote registry replaces the local copy and is healed against the
/// published list.
#[tokio::test]
async fn remote_registry_replaces_local() -> Result<(), AppError> {
    let (_, misty) = UserFactory::new()
        .username("misty")
        .friend_code("5555666677778888")
        .build();
    let remote = serde_json::json!({ "200": misty });

    let test = TestBuilder::new()
        .with_user(UserFactory::new().member_id(100).build())
        .with_remote_file("users.json", serde_json::to_vec(&remote).unwrap())
        .with_remote_file("ids.txt", "5555666677778888\n")
        .build()
        .await
        .unwrap();
    let store = store_for(&test);

    let corrected = store.resync_on_startup().await?;

    let local = test.read_registry();
    assert_eq!(corrected, 1);
    assert!(local.get("100").is_none());
    assert_eq!(local["200"]["username"], "misty");
    assert_eq!(local["200"]["status"], "online");

    Ok(())
}

/// Tests that an unreachable repository keeps the local copy as-is.
#[tokio::test]
async fn remote_failure_keeps_local_copy() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(UserFactory::new().member_id(100).online().build())
        .with_github()
        .build()
        .await
        .unwrap();
    test.repo().unwrap().set_failing(true);
    let before = test.read_registry();
    let store = store_for(&test);

    let corrected = store.resync_on_startup().await?;

    assert_eq!(corrected, 0);
    assert_eq!(test.read_registry(), before);

    Ok(())
}
