use super::*;

/// Tests banning an online member.
///
/// Expected: expiry stored, both slots offline, codes withdrawn from the list
#[tokio::test]
async fn bans_and_takes_member_offline() -> Result<(), AppError> {
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
    let now = Utc::now();

    let expiry = ModerationService::new(&store)
        .tempban(100, 48, now)
        .await?;

    assert_eq!(expiry, now + Duration::hours(48));
    let local = test.read_registry();
    assert_eq!(local["100"]["status"], "offline");
    let stored: DateTime<Utc> = serde_json::from_value(local["100"]["ban_expiry"].clone())?;
    assert_eq!(stored, expiry);
    assert_eq!(test.repo().unwrap().text("ids.txt").as_deref(), Some(""));

    Ok(())
}

/// Tests that only registered members can be banned.
///
/// Expected: the error names the target member, not the invoking admin
#[tokio::test]
async fn requires_registration() {
    let test = TestBuilder::new().build().await.unwrap();
    let store = store_for(&test);

    let result = ModerationService::new(&store)
        .tempban(100, 48, Utc::now())
        .await;

    assert!(matches!(
        result,
        Err(AppError::RegistryErr(RegistryError::MemberNotRegistered(100)))
    ));
    assert_eq!(
        result.unwrap_err().user_message(),
        "❌ <@100> is not registered."
    );
}

/// Tests ban lengths that cannot be represented as an expiry.
///
/// Expected: rejected before the registry is touched, member stays online
#[tokio::test]
async fn rejects_out_of_range_lengths() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(
            UserFactory::new()
                .member_id(100)
                .friend_code("1111222233334444")
                .online()
                .build(),
        )
        .build()
        .await
        .unwrap();
    let store = store_for(&test);
    let moderation = ModerationService::new(&store);

    for hours in [0, -5, MAX_BAN_HOURS + 1, i64::MAX] {
        let result = moderation.tempban(100, hours, Utc::now()).await;
        assert!(
            matches!(
                result,
                Err(AppError::RegistryErr(RegistryError::InvalidBanLength { .. }))
            ),
            "{}",
            hours
        );
    }
    assert_eq!(test.read_registry()["100"]["status"], "online");

    let expiry = moderation.tempban(100, MAX_BAN_HOURS, Utc::now()).await?;
    assert!(expiry > Utc::now());

    Ok(())
}
