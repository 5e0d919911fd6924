use super::*;

/// Tests registering a member with two codes.
///
/// Expected: Ok with both codes stored and both slots offline
#[tokio::test]
async fn registers_member_with_secondary_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_github().build().await.unwrap();
    let store = store_for(&test);

    let record = MemberService::new(&store)
        .register(
            100,
            RegisterUserParam {
                username: "ash".to_string(),
                friend_code: "1111222233334444".to_string(),
                instances: 4,
                prefix: "ashbot".to_string(),
                secondary_friend_code: Some("5555666677778888".to_string()),
            },
        )
        .await?;

    assert_eq!(record.primary_status, SlotStatus::Offline);
    assert_eq!(record.secondary_status, SlotStatus::Offline);

    let local = test.read_registry();
    assert_eq!(local["100"]["friend_code"], "1111222233334444");
    assert_eq!(local["100"]["secondary_friend_code"], "5555666677778888");
    assert_eq!(local["100"]["prefix"], "ashbot");
    assert!(test.repo().unwrap().commits_for("ids.txt").is_empty());

    Ok(())
}

/// Tests that a malformed code reports the length that was typed.
#[tokio::test]
async fn rejects_malformed_code() {
    let test = TestBuilder::new().build().await.unwrap();
    let store = store_for(&test);

    let result = MemberService::new(&store)
        .register(
            100,
            RegisterUserParam {
                username: "ash".to_string(),
                friend_code: "1234".to_string(),
                instances: 1,
                prefix: String::new(),
                secondary_friend_code: None,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::RegistryErr(RegistryError::InvalidCodeFormat { len: 4 }))
    ));
    assert!(test.read_registry().is_null());
}
