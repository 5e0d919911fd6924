use super::*;

/// Tests that a policer ban takes the member offline without an expiry.
///
/// Expected: both slots offline, heartbeat memory cleared, no `ban_expiry`
#[tokio::test]
async fn takes_offline_without_expiry() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(
            UserFactory::new()
                .member_id(100)
                .secondary_friend_code("5555666677778888")
                .online()
                .secondary_online()
                .last_heartbeat(40, 90)
                .build(),
        )
        .build()
        .await
        .unwrap();
    let store = store_for(&test);

    ModerationService::new(&store).auto_ban(100).await?;

    let local = test.read_registry();
    assert_eq!(local["100"]["status"], "offline");
    assert_eq!(local["100"]["secondary_status"], "offline");
    assert!(local["100"].get("last_heartbeat").is_none());
    assert!(local["100"].get("ban_expiry").is_none());

    Ok(())
}
