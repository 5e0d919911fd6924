use super::*;

/// Tests that changing the code of an online slot republishes the new code.
///
/// Expected: slot stays online and the published file swaps the code
#[tokio::test]
async fn online_slot_republishes_new_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(
            UserFactory::new()
                .member_id(100)
                .friend_code("1111222233334444")
                .online()
                .build(),
        )
        .with_remote_file("ids.txt", "1111222233334444")
        .build()
        .await
        .unwrap();
    let store = store_for(&test);

    let change = MemberService::new(&store)
        .change_code(100, Slot::Primary, "9999888877776666")
        .await?;

    assert!(change.online);
    assert_eq!(
        change.previous.as_ref().map(|code| code.as_str()),
        Some("1111222233334444")
    );
    assert_eq!(test.read_registry()["100"]["status"], "online");
    assert_eq!(
        test.repo().unwrap().text("ids.txt").as_deref(),
        Some("9999888877776666")
    );

    Ok(())
}

/// Tests that a member cannot take a code held by another member.
#[tokio::test]
async fn rejects_code_held_elsewhere() {
    let test = TestBuilder::new()
        .with_user(UserFactory::new().member_id(100).build())
        .with_user(
            UserFactory::new()
                .member_id(200)
                .secondary_friend_code("5555666677778888")
                .build(),
        )
        .build()
        .await
        .unwrap();
    let store = store_for(&test);

    let result = MemberService::new(&store)
        .change_code(100, Slot::Secondary, "5555666677778888")
        .await;

    assert!(matches!(
        result,
        Err(AppError::RegistryErr(RegistryError::CodeTaken(_)))
    ));
}

/// Tests that an unregistered member is told to register first.
#[tokio::test]
async fn requires_registration() {
    let test = TestBuilder::new().build().await.unwrap();
    let store = store_for(&test);

    let result = MemberService::new(&store)
        .change_code(100, Slot::Primary, "1111222233334444")
        .await;

    assert!(matches!(
        result,
        Err(AppError::RegistryErr(RegistryError::NotRegistered))
    ));
}
