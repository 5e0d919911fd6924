use super::*;

/// Tests going online and back offline.
///
/// Expected: code published then withdrawn; `any_online` tracks the member
#[tokio::test]
async fn toggles_slot_and_published_set() -> Result<(), AppError> {
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
    let store = store_for(&test);
    let service = MemberService::new(&store);

    let online = service
        .set_status(100, Slot::Primary, SlotStatus::Online, Utc::now())
        .await?;
    assert_eq!(online.previous, SlotStatus::Offline);
    assert!(online.any_online);
    assert_eq!(
        online.code.as_ref().map(|code| code.as_str()),
        Some("1111222233334444")
    );
    assert_eq!(
        test.repo().unwrap().text("ids.txt").as_deref(),
        Some("1111222233334444")
    );

    let offline = service
        .set_status(100, Slot::Primary, SlotStatus::Offline, Utc::now())
        .await?;
    assert_eq!(offline.previous, SlotStatus::Online);
    assert!(!offline.any_online);
    assert_eq!(test.repo().unwrap().text("ids.txt").as_deref(), Some(""));

    Ok(())
}

/// Tests that a banned member cannot go online.
#[tokio::test]
async fn banned_member_cannot_go_online() {
    let expiry = Utc::now() + Duration::hours(12);
    let test = TestBuilder::new()
        .with_user(UserFactory::new().member_id(100).banned_until(expiry).build())
        .build()
        .await
        .unwrap();
    let store = store_for(&test);

    let result = MemberService::new(&store)
        .set_status(100, Slot::Primary, SlotStatus::Online, Utc::now())
        .await;

    assert!(matches!(
        result,
        Err(AppError::RegistryErr(RegistryError::Banned(_)))
    ));
    assert_eq!(test.read_registry()["100"]["status"], "offline");
}

/// Tests that a slot without a code cannot go online.
#[tokio::test]
async fn empty_slot_cannot_go_online() {
    let test = TestBuilder::new()
        .with_user(UserFactory::new().member_id(100).build())
        .build()
        .await
        .unwrap();
    let store = store_for(&test);

    let result = MemberService::new(&store)
        .set_status(100, Slot::Secondary, SlotStatus::Online, Utc::now())
        .await;

    assert!(matches!(
        result,
        Err(AppError::RegistryErr(RegistryError::MissingCode("secondary")))
    ));
}
