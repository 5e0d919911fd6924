use super::*;

/// Tests that unregistering an online member withdraws their code.
#[tokio::test]
async fn removes_record_and_published_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(
            UserFactory::new()
                .member_id(100)
                .friend_code("1111222233334444")
                .online()
                .build(),
        )
        .with_user(
            UserFactory::new()
                .member_id(200)
                .friend_code("5555666677778888")
                .online()
                .build(),
        )
        .with_github()
        .build()
        .await
        .unwrap();
    let store = store_for(&test);

    MemberService::new(&store).unregister(100).await?;

    assert!(test.read_registry().get("100").is_none());
    assert_eq!(
        test.repo().unwrap().text("ids.txt").as_deref(),
        Some("5555666677778888")
    );

    Ok(())
}

#[tokio::test]
async fn unknown_member_is_not_registered() {
    let test = TestBuilder::new().build().await.unwrap();
    let store = store_for(&test);

    let result = MemberService::new(&store).unregister(100).await;

    assert!(matches!(
        result,
        Err(AppError::RegistryErr(RegistryError::NotRegistered))
    ));
}
