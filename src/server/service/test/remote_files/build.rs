use super::*;

/// Tests that a build is stored under the build directory.
#[tokio::test]
async fn stores_build_under_directory() -> Result<(), AppError> {
    let test = TestBuilder::new().with_github().build().await.unwrap();
    let remote = remote_for(&test);

    let path = BuildService::new(remote.as_deref(), "builds")
        .upload("Reroll-v2.zip", b"PK\x03\x04build")
        .await?;

    assert_eq!(path, "builds/Reroll-v2.zip");
    let (content, _) = test.repo().unwrap().get("builds/Reroll-v2.zip").unwrap();
    assert_eq!(content, b"PK\x03\x04build".to_vec());

    Ok(())
}

/// Tests that uploading the same build twice commits once.
#[tokio::test]
async fn identical_upload_commits_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_github().build().await.unwrap();
    let remote = remote_for(&test);
    let service = BuildService::new(remote.as_deref(), "builds");

    service.upload("Reroll.ahk", b"v1").await?;
    service.upload("Reroll.ahk", b"v1").await?;
    service.upload("Reroll.ahk", b"v2").await?;

    assert_eq!(test.repo().unwrap().commits_for("builds/Reroll.ahk").len(), 2);

    Ok(())
}

#[tokio::test]
async fn requires_remote_storage() {
    let result = BuildService::new(None, "builds")
        .upload("Reroll.zip", b"data")
        .await;

    assert!(matches!(
        result,
        Err(AppError::RemoteErr(RemoteError::Disabled))
    ));
}
