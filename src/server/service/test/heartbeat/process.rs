use super::*;

/// Tests that a clean heartbeat stores its sample for the member it names.
///
/// Expected: Accepted, sample stored in the local registry only
#[tokio::test]
async fn stores_sample_of_clean_heartbeat() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(
            UserFactory::new()
                .member_id(100)
                .prefix("ashbot")
                .online()
                .build(),
        )
        .with_github()
        .build()
        .await
        .unwrap();
    let store = store_for(&test);
    let policer = policer();

    let outcome = HeartbeatService::new(&store, &policer)
        .process("AshBot\nTime: 30m Packs: 75", &Whitelist::default())
        .await?;

    let sample = HeartbeatSample {
        elapsed_minutes: 30,
        pack_count: 75,
    };
    assert_eq!(
        outcome,
        HeartbeatOutcome::Accepted {
            member: 100,
            sample: Some(sample)
        }
    );
    assert_eq!(test.read_registry()["100"]["last_heartbeat"]["elapsed_minutes"], 30);
    assert!(test.repo().unwrap().commits().is_empty());

    Ok(())
}

/// Tests that a stalled member is auto-banned and withdrawn from the list.
///
/// Expected: Rejected with a stalling violation, slots offline, memory cleared
#[tokio::test]
async fn auto_bans_stalled_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(
            UserFactory::new()
                .member_id(100)
                .friend_code("1111222233334444")
                .online()
                .last_heartbeat(30, 75)
                .build(),
        )
        .with_remote_file("ids.txt", "1111222233334444")
        .build()
        .await
        .unwrap();
    let store = store_for(&test);
    let policer = policer();

    let outcome = HeartbeatService::new(&store, &policer)
        .process("100\nTime: 60m Packs: 75", &Whitelist::default())
        .await?;

    assert!(matches!(
        outcome,
        HeartbeatOutcome::Rejected {
            member: 100,
            violation: Violation::Stalling { .. }
        }
    ));
    let local = test.read_registry();
    assert_eq!(local["100"]["status"], "offline");
    assert!(local["100"].get("last_heartbeat").is_none());
    assert_eq!(test.repo().unwrap().text("ids.txt").as_deref(), Some(""));

    Ok(())
}

/// Tests that a forbidden pack is caught against the whitelist.
#[tokio::test]
async fn rejects_pack_outside_whitelist() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(UserFactory::new().member_id(100).username("ash").online().build())
        .build()
        .await
        .unwrap();
    let store = store_for(&test);
    let policer = policer();

    let outcome = HeartbeatService::new(&store, &policer)
        .process(
            "ash\nTime: 10m Packs: 20\nOpening: Mewtwo, Pikachu",
            &Whitelist::from_lines("Mewtwo"),
        )
        .await?;

    assert_eq!(
        outcome,
        HeartbeatOutcome::Rejected {
            member: 100,
            violation: Violation::ForbiddenPack("Pikachu".to_string())
        }
    );

    Ok(())
}

/// Tests that a heartbeat naming nobody is left alone.
#[tokio::test]
async fn unknown_identity_is_unattributed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(UserFactory::new().member_id(100).build())
        .build()
        .await
        .unwrap();
    let before = test.read_registry();
    let store = store_for(&test);
    let policer = policer();

    let outcome = HeartbeatService::new(&store, &policer)
        .process("stranger\nTime: 10m Packs: 20 inject", &Whitelist::default())
        .await?;

    assert_eq!(outcome, HeartbeatOutcome::Unattributed);
    assert_eq!(test.read_registry(), before);

    Ok(())
}

/// Tests that whitelisting a flagged pack clears the same heartbeat on resubmission.
///
/// Expected: first submission Rejected for the pack and memory cleared; after
/// `set_entry` the identical message is Accepted with no stall against the
/// cleared memory
#[tokio::test]
async fn accepts_pack_once_whitelisted() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user(
            UserFactory::new()
                .member_id(100)
                .username("ash")
                .friend_code("1111222233334444")
                .online()
                .last_heartbeat(30, 40)
                .build(),
        )
        .with_whitelist(&["Mewtwo"])
        .build()
        .await
        .unwrap();
    let store = store_for(&test);
    let policer = policer();
    let whitelist =
        WhitelistService::new(test.whitelist_path(), remote_for(&test), "whitelist.txt");
    whitelist.load().await;
    let service = HeartbeatService::new(&store, &policer);
    let content = "ash\nTime: 60m Packs: 75\nOpening: Pikachu";

    let outcome = service.process(content, &whitelist.snapshot().await).await?;

    assert_eq!(
        outcome,
        HeartbeatOutcome::Rejected {
            member: 100,
            violation: Violation::ForbiddenPack("Pikachu".to_string())
        }
    );
    assert!(test.read_registry()["100"].get("last_heartbeat").is_none());

    assert!(whitelist.set_entry("Pikachu", true).await?);
    let outcome = service.process(content, &whitelist.snapshot().await).await?;

    let sample = HeartbeatSample {
        elapsed_minutes: 60,
        pack_count: 75,
    };
    assert_eq!(
        outcome,
        HeartbeatOutcome::Accepted {
            member: 100,
            sample: Some(sample)
        }
    );
    assert_eq!(test.read_registry()["100"]["last_heartbeat"]["pack_count"], 75);

    Ok(())
}
