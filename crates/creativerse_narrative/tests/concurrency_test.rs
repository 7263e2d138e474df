//! Responses that race with resets, branch switches and other edits.

mod test_utils;

use creativerse_core::{Character, StoryPath};
use creativerse_error::{CreativerseErrorKind, ValidationErrorKind};
use creativerse_narrative::{BranchController, EditOutcome, StoryPhase};
use std::future::Future;
use std::sync::Arc;
use test_utils::{controls, story_config, MockGateway};

/// Yield to spawned tasks until `check` holds.
async fn wait_until<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..10_000 {
        if check().await {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("Condition never became true");
}

async fn started(rounds: u32) -> Arc<BranchController<MockGateway>> {
    let controller = Arc::new(BranchController::new(MockGateway::new(2), story_config(2)));
    controller.start(controls(rounds, vec![])).await.unwrap();
    controller
}

#[tokio::test]
async fn test_round_arriving_after_reset_is_dropped() {
    let controller = started(3).await;
    controller.gateway().hold_rounds();

    let picking = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.select_option(0).await }
    });
    wait_until(|| {
        let controller = Arc::clone(&controller);
        async move { controller.phase().await == StoryPhase::Loading }
    })
    .await;

    // Loading blocks other transitions but not reads or reset.
    let before = controller.snapshot().await;
    assert!(controller.select_option(1).await.is_err());
    assert!(controller.switch_branch(StoryPath::root()).await.is_err());
    assert!(controller
        .edit_node(StoryPath::from(vec![0]), "t", "b")
        .await
        .is_err());
    assert!(controller.gateway().illustration_requests().is_empty());
    assert_eq!(controller.snapshot().await.timeline(), before.timeline());
    assert!(controller.current_options().await.is_none());
    controller.reset().await;

    controller.gateway().release_round();
    picking.await.unwrap().unwrap();

    let snapshot = controller.snapshot().await;
    assert_eq!(*snapshot.phase(), StoryPhase::Idle);
    assert!(snapshot.timeline().is_empty());
    assert!(snapshot.banners().is_empty());
}

#[tokio::test]
async fn test_opening_arriving_after_reset_is_dropped() {
    let controller = Arc::new(BranchController::new(MockGateway::new(2), story_config(2)));
    controller.gateway().hold_rounds();

    let starting = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.start(controls(2, vec![])).await }
    });
    wait_until(|| {
        let controller = Arc::clone(&controller);
        async move { !controller.gateway().round_requests().is_empty() }
    })
    .await;

    controller.reset().await;
    controller.gateway().release_round();
    starting.await.unwrap().unwrap();

    assert_eq!(controller.phase().await, StoryPhase::Idle);
    assert!(controller.snapshot().await.timeline().is_empty());
}

#[tokio::test]
async fn test_refresh_arriving_after_reset_is_discarded() {
    let controller = started(2).await;
    controller.gateway().hold_illustrations();

    let editing = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move {
            controller
                .edit_node(StoryPath::from(vec![0]), "Edited", "Edited body")
                .await
        }
    });
    wait_until(|| {
        let controller = Arc::clone(&controller);
        async move { !controller.gateway().illustration_requests().is_empty() }
    })
    .await;

    controller.reset().await;
    controller.start(controls(2, vec![])).await.unwrap();
    controller.gateway().release_illustration();

    assert_eq!(editing.await.unwrap().unwrap(), EditOutcome::Discarded);
    let fresh = controller.snapshot().await;
    let option = fresh.timeline().option_at(&StoryPath::from(vec![0])).unwrap();
    assert_eq!(option.title, "R1-1");
    assert_eq!(option.illustration.as_str(), "img://R1-1");
}

#[tokio::test]
async fn test_refresh_arriving_after_branch_switch_is_discarded() {
    let controller = started(3).await;
    controller.select_option(0).await.unwrap();
    controller.gateway().hold_illustrations();

    let editing = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move {
            controller
                .edit_node(StoryPath::from(vec![0, 1]), "Edited", "Edited body")
                .await
        }
    });
    wait_until(|| {
        let controller = Arc::clone(&controller);
        async move { !controller.gateway().illustration_requests().is_empty() }
    })
    .await;

    controller.switch_branch(StoryPath::from(vec![0])).await.unwrap();
    controller.gateway().release_illustration();

    assert_eq!(editing.await.unwrap().unwrap(), EditOutcome::Discarded);
    let snapshot = controller.snapshot().await;
    let regenerated = snapshot
        .timeline()
        .option_at(&StoryPath::from(vec![0, 1]))
        .unwrap();
    assert!(!regenerated.illustration.as_str().starts_with("img://redrawn"));
}

#[tokio::test]
async fn test_second_edit_on_same_node_rejected_while_refreshing() {
    let controller = started(2).await;
    controller.gateway().hold_illustrations();

    let first = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move {
            controller
                .edit_node(StoryPath::from(vec![1]), "First", "First body")
                .await
        }
    });
    wait_until(|| {
        let controller = Arc::clone(&controller);
        async move { !controller.gateway().illustration_requests().is_empty() }
    })
    .await;

    // Text is already committed while the art is pending.
    let pending = controller.snapshot().await;
    assert_eq!(
        pending
            .timeline()
            .option_at(&StoryPath::from(vec![1]))
            .unwrap()
            .title,
        "First"
    );

    let err = controller
        .edit_node(StoryPath::from(vec![1]), "Second", "Second body")
        .await
        .unwrap_err();
    match err.kind() {
        CreativerseErrorKind::Validation(e) => {
            assert_eq!(e.kind, ValidationErrorKind::EditInProgress("1".to_string()))
        }
        other => panic!("Expected validation error, got {:?}", other),
    }

    controller.gateway().release_illustration();
    assert_eq!(first.await.unwrap().unwrap(), EditOutcome::Refreshed);

    let done = controller.snapshot().await;
    let option = done.timeline().option_at(&StoryPath::from(vec![1])).unwrap();
    assert_eq!(option.title, "First");
    assert_eq!(option.illustration.as_str(), "img://redrawn/First");

    // The slot is free again.
    controller.gateway().release_illustration();
    controller
        .edit_node(StoryPath::from(vec![1]), "Third", "Third body")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_picking_while_refresh_pending_keeps_both() {
    let controller = started(3).await;
    controller.gateway().hold_illustrations();

    let editing = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move {
            controller
                .edit_node(StoryPath::from(vec![0]), "Edited", "Edited body")
                .await
        }
    });
    wait_until(|| {
        let controller = Arc::clone(&controller);
        async move { !controller.gateway().illustration_requests().is_empty() }
    })
    .await;

    controller.select_option(0).await.unwrap();
    controller.gateway().release_illustration();
    assert_eq!(editing.await.unwrap().unwrap(), EditOutcome::Refreshed);

    let story = controller.story_so_far().await;
    assert_eq!(story[0].title, "Edited");
    assert_eq!(story[0].illustration.as_str(), "img://redrawn/Edited");
    assert_eq!(controller.snapshot().await.timeline().rounds_generated(), 2);
}

#[tokio::test]
async fn test_cast_keeps_input_order_when_first_finishes_last() {
    let controller = Arc::new(BranchController::new(MockGateway::new(2), story_config(2)));
    controller.gateway().hold_character("A young inventor");

    let cast = vec![
        Character::portrait("Leo", "A young inventor"),
        Character::symbolic("Frida", "A curious toddler", "Magic & Wonder"),
        Character::portrait("Bolt", "A shy robot"),
    ];
    let starting = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.start(controls(2, cast)).await }
    });
    wait_until(|| {
        let controller = Arc::clone(&controller);
        async move { controller.gateway().realized().len() == 2 }
    })
    .await;
    assert_eq!(controller.phase().await, StoryPhase::Loading);

    controller.gateway().release_character("A young inventor");
    starting.await.unwrap().unwrap();

    assert_eq!(
        controller.gateway().realized().last().map(String::as_str),
        Some("A young inventor")
    );
    let roster = controller.roster().await;
    let names: Vec<_> = roster.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Leo", "Frida", "Bolt"]);
    let images: Vec<_> = roster
        .iter()
        .map(|c| c.illustration.as_ref().unwrap().as_str())
        .collect();
    assert_eq!(
        images,
        [
            "img://portrait/A young inventor",
            "img://symbol/Frida",
            "img://portrait/A shy robot",
        ]
    );
    assert!(roster[1].symbolic_concept.is_some());
}
