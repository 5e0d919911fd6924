use super::*;

/// Tests that allowing a pack saves it locally and remotely.
#[tokio::test]
async fn saves_change_locally_and_remotely() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_whitelist(&["Mewtwo"])
        .with_github()
        .build()
        .await
        .unwrap();
    let service = service_for(&test);
    service.load().await;

    assert!(service.set_entry("Charizard", true).await?);

    assert_eq!(test.read_whitelist(), "Charizard\nMewtwo");
    assert_eq!(
        test.repo().unwrap().text("whitelist.txt").as_deref(),
        Some("Charizard\nMewtwo")
    );
    assert!(service.snapshot().await.contains("charizard"));

    Ok(())
}

/// Tests that removing a pack and repeating a no-op report change correctly.
#[tokio::test]
async fn reports_whether_anything_changed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_whitelist(&["Mewtwo", "Charizard"])
        .build()
        .await
        .unwrap();
    let service = service_for(&test);
    service.load().await;

    assert!(service.set_entry("mewtwo", false).await?);
    assert!(!service.set_entry("mewtwo", false).await?);
    assert!(!service.set_entry("charizard", true).await?);
    assert_eq!(test.read_whitelist(), "Charizard");

    Ok(())
}
