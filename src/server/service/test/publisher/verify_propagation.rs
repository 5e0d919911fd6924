use super::*;

fn code(value: &str) -> FriendCode {
    FriendCode::parse(value).unwrap()
}

/// Tests that polling continues until the mirror serves the code.
///
/// Expected: Visible after the two lagging requests
#[tokio::test]
async fn visible_after_mirror_catches_up() {
    let test = TestBuilder::new()
        .with_remote_file("ids.txt", "1111222233334444\n5555666677778888")
        .build()
        .await
        .unwrap();
    test.repo().unwrap().set_mirror_lag(2);
    let publisher = publisher_for(&test);

    let outcome = publisher
        .verify_propagation(&code("5555666677778888"))
        .await;

    assert_eq!(outcome, Propagation::Visible { attempts: 3 });
}

/// Tests that a code never served exhausts the attempt budget.
#[tokio::test]
async fn not_visible_when_code_absent() {
    let test = TestBuilder::new()
        .with_remote_file("ids.txt", "1111222233334444")
        .build()
        .await
        .unwrap();
    let publisher = publisher_for(&test);

    let outcome = publisher
        .verify_propagation(&code("5555666677778888"))
        .await;

    assert_eq!(outcome, Propagation::NotVisible { attempts: 3 });
}

/// Tests that a failing mirror counts every request as an attempt.
#[tokio::test]
async fn failing_mirror_is_not_visible() {
    let test = TestBuilder::new()
        .with_remote_file("ids.txt", "1111222233334444")
        .build()
        .await
        .unwrap();
    test.repo().unwrap().set_failing(true);
    let publisher = publisher_for(&test);

    let outcome = publisher
        .verify_propagation(&code("1111222233334444"))
        .await;

    assert_eq!(outcome, Propagation::NotVisible { attempts: 3 });
}

/// Tests that verification is skipped without a mirror.
#[tokio::test]
async fn unchecked_without_mirror() {
    let test = TestBuilder::new().build().await.unwrap();
    let publisher = publisher_for(&test);

    let outcome = publisher
        .verify_propagation(&code("1111222233334444"))
        .await;

    assert_eq!(outcome, Propagation::Unchecked);
}
