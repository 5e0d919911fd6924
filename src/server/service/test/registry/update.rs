use super::*;

/// Tests that an online toggle is written locally, persisted and republished.
///
/// Expected: local status online, both online files hold the code, and every commit
/// carries `[skip ci]`
#[tokio::test]
async fn writes_local_and_remote_files() -> Result<(), AppError> {
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

    store
        .update(|registry| registry.set_status(100, Slot::Primary, SlotStatus::Online, Utc::now()))
        .await?;

    assert_eq!(test.read_registry()["100"]["status"], "online");

    let repo = test.repo().unwrap();
    assert_eq!(repo.text("ids.txt").as_deref(), Some("1111222233334444"));
    assert_eq!(repo.text("online.txt").as_deref(), Some("1111222233334444"));
    assert!(repo.text("users.json").is_some());
    assert!(!repo.commits().is_empty());
    assert!(repo
        .commits()
        .iter()
        .all(|commit| commit.message.contains("[skip ci]")));

    Ok(())
}

/// Tests that a rejected mutation leaves both the local file and the remote untouched.
///
/// Expected: Err(RegistryErr(CodeTaken)), no commits, file unchanged
#[tokio::test]
async fn rejected_mutation_writes_nothing() -> Result<(), AppError> {
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
    let before = test.read_registry();

    let result = store
        .update(|registry| registry.register(200, param("misty", "1111222233334444")).map(|_| ()))
        .await;

    assert!(matches!(
        result,
        Err(AppError::RegistryErr(RegistryError::CodeTaken(_)))
    ));
    assert_eq!(test.read_registry(), before);
    assert!(test.repo().unwrap().commits().is_empty());

    Ok(())
}

/// Tests that an unreachable repository does not fail a local mutation.
///
/// Expected: Ok with the local file updated
#[tokio::test]
async fn remote_failure_keeps_local_write() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(UserFactory::new().member_id(100).build())
        .with_github()
        .build()
        .await
        .unwrap();
    test.repo().unwrap().set_failing(true);
    let store = store_for(&test);

    store
        .update(|registry| registry.set_status(100, Slot::Primary, SlotStatus::Online, Utc::now()))
        .await?;

    assert_eq!(test.read_registry()["100"]["status"], "online");
    assert!(test.repo().unwrap().commits().is_empty());

    Ok(())
}

/// Tests that a change which leaves the online set alone does not republish.
///
/// Expected: registry persisted remotely, online files untouched
#[tokio::test]
async fn unchanged_online_set_skips_republish() -> Result<(), AppError> {
    let test = TestBuilder::new().with_github().build().await.unwrap();
    let store = store_for(&test);

    store
        .update(|registry| registry.register(100, param("ash", "1111222233334444")).map(|_| ()))
        .await?;

    let repo = test.repo().unwrap();
    assert_eq!(repo.commits_for("users.json").len(), 1);
    assert!(repo.commits_for("ids.txt").is_empty());
    assert!(repo.commits_for("online.txt").is_empty());

    Ok(())
}

/// Tests that heartbeat samples are saved locally without a remote commit.
#[tokio::test]
async fn heartbeat_samples_stay_local() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(UserFactory::new().member_id(100).build())
        .with_github()
        .build()
        .await
        .unwrap();
    let store = store_for(&test);

    store
        .update(|registry| {
            registry.record_heartbeat(
                100,
                HeartbeatSample {
                    elapsed_minutes: 30,
                    pack_count: 75,
                },
            )
        })
        .await?;

    assert_eq!(test.read_registry()["100"]["last_heartbeat"]["pack_count"], 75);
    assert!(test.repo().unwrap().commits().is_empty());

    Ok(())
}

/// Tests that the store works with remote storage disabled.
#[tokio::test]
async fn works_without_remote() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = store_for(&test);

    store
        .update(|registry| registry.register(100, param("ash", "1111222233334444")).map(|_| ()))
        .await?;

    assert_eq!(test.read_registry()["100"]["friend_code"], "1111222233334444");

    Ok(())
}

/// Tests that concurrent mutations are serialized without lost updates.
///
/// Expected: every concurrently registered member is present afterwards
#[tokio::test]
async fn concurrent_updates_are_serialized() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = Arc::new(store_for(&test));

    let handles: Vec<_> = (1..=10u64)
        .map(|member| {
            let store = store.clone();
            tokio::spawn(async move {
                let code = format!("{:016}", member);
                store
                    .update(|registry| {
                        registry
                            .register(member, param(&format!("user{}", member), &code))
                            .map(|_| ())
                    })
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap()?;
    }

    assert_eq!(store.snapshot().await.len(), 10);

    Ok(())
}
