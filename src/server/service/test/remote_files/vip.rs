use super::*;

/// Tests removing a listed VIP code.
///
/// Expected: Ok(true) with every line holding the code dropped
#[tokio::test]
async fn removes_listed_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_remote_file(
            "vip_ids.txt",
            "1111222233334444\n5555666677778888\n1111222233334444 ",
        )
        .build()
        .await
        .unwrap();
    let remote = remote_for(&test);

    let removed = VipService::new(remote.as_deref(), "vip_ids.txt")
        .remove_vip("1111222233334444")
        .await?;

    assert!(removed);
    assert_eq!(
        test.repo().unwrap().text("vip_ids.txt").as_deref(),
        Some("5555666677778888")
    );

    Ok(())
}

/// Tests that an unlisted code is reported without a write.
#[tokio::test]
async fn unlisted_code_is_not_removed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_remote_file("vip_ids.txt", "5555666677778888")
        .build()
        .await
        .unwrap();
    let remote = remote_for(&test);

    let removed = VipService::new(remote.as_deref(), "vip_ids.txt")
        .remove_vip("1111222233334444")
        .await?;

    assert!(!removed);
    assert!(test.repo().unwrap().commits().is_empty());

    Ok(())
}

#[tokio::test]
async fn rejects_malformed_code() {
    let test = TestBuilder::new().with_github().build().await.unwrap();
    let remote = remote_for(&test);

    let result = VipService::new(remote.as_deref(), "vip_ids.txt")
        .remove_vip("12ab")
        .await;

    assert!(matches!(
        result,
        Err(AppError::RegistryErr(RegistryError::InvalidCodeFormat { .. }))
    ));
}

#[tokio::test]
async fn requires_remote_storage() {
    let result = VipService::new(None, "vip_ids.txt")
        .remove_vip("1111222233334444")
        .await;

    assert!(matches!(
        result,
        Err(AppError::RemoteErr(RemoteError::Disabled))
    ));
}
