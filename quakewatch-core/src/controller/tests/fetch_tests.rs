use crate::controller::{FetchController, FetchOutcome, FetchStatus};
use crate::test_support::{Scripted, ScriptedSource, feature, feed_body};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

fn features(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| feature(&format!("ev{i}"), i as f64, "Somewhere"))
        .collect()
}

fn controller(script: Vec<Scripted>) -> (Arc<ScriptedSource>, Arc<FetchController>) {
    let source = Arc::new(ScriptedSource::new(script));
    let controller = Arc::new(FetchController::new(source.clone()));
    (source, controller)
}

#[tokio::test]
async fn starts_idle_and_empty() {
    let (source, controller) = controller(vec![]);
    let snap = controller.snapshot();

    assert_eq!(snap.status, FetchStatus::Idle);
    assert!(snap.events.is_empty());
    assert!(snap.last_updated.is_none());
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn success_replaces_event_set() {
    let mut broken = feature("x", 1.0, "x");
    broken.as_object_mut().unwrap().remove("id");
    let body = feed_body(vec![feature("a", 1.0, "A"), broken, feature("b", 2.0, "B")]);

    let (source, controller) = controller(vec![Scripted::Body(body)]);

    let outcome = controller.fetch().await;

    assert_eq!(
        outcome,
        FetchOutcome::Applied {
            seq: 1,
            events: 2,
            rejected: 1,
        }
    );

    let snap = controller.snapshot();
    assert_eq!(snap.status, FetchStatus::Success);
    assert_eq!(snap.events.len(), 2);
    assert_eq!(snap.rejected, 1);
    assert_eq!(snap.error, None);
    assert!(snap.last_updated.is_some());
    assert_eq!(snap.applied_seq, 1);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn each_success_fully_replaces_previous_set() {
    let (_, controller) = controller(vec![
        Scripted::Body(feed_body(features(5))),
        Scripted::Body(feed_body(vec![feature("only", 3.0, "Here")])),
    ]);

    controller.fetch().await;
    controller.fetch().await;

    let snap = controller.snapshot();
    assert_eq!(snap.events.len(), 1);
    assert_eq!(snap.events.as_slice()[0].id.as_str(), "only");
}

#[tokio::test]
async fn failure_keeps_existing_events() {
    let (_, controller) = controller(vec![
        Scripted::Body(feed_body(features(5))),
        Scripted::Fail("connection refused"),
    ]);

    controller.fetch().await;
    let updated_at = controller.snapshot().last_updated;

    let outcome = controller.fetch().await;
    assert!(matches!(outcome, FetchOutcome::Failed { seq: 2, .. }));

    let snap = controller.snapshot();
    assert_eq!(snap.status, FetchStatus::Failure);
    assert_eq!(snap.events.len(), 5);
    assert!(snap.error.as_deref().is_some_and(|e| !e.is_empty()));
    assert_eq!(snap.last_updated, updated_at);
}

#[tokio::test]
async fn malformed_payload_is_a_failure() {
    let (_, controller) = controller(vec![Scripted::Body("<html>oops</html>".to_string())]);

    controller.fetch().await;

    let snap = controller.snapshot();
    assert_eq!(snap.status, FetchStatus::Failure);
    assert!(snap.error.as_deref().unwrap().contains("malformed feed payload"));
    assert!(snap.events.is_empty());
}

#[tokio::test]
async fn success_after_failure_clears_error() {
    let (_, controller) = controller(vec![
        Scripted::Fail("timeout"),
        Scripted::Body(feed_body(features(2))),
    ]);

    controller.fetch().await;
    assert_eq!(controller.snapshot().status, FetchStatus::Failure);

    controller.fetch().await;
    let snap = controller.snapshot();
    assert_eq!(snap.status, FetchStatus::Success);
    assert_eq!(snap.error, None);
}

#[tokio::test(start_paused = true)]
async fn in_flight_fetch_reports_loading() {
    let (_, controller) = controller(vec![Scripted::Delayed(
        Duration::from_secs(2),
        feed_body(features(3)),
    )]);

    let handle = controller.fetch_now();
    tokio::task::yield_now().await;

    assert_eq!(controller.snapshot().status, FetchStatus::Loading);
    assert_eq!(controller.snapshot().status, FetchStatus::Loading);

    handle.await.unwrap();
    assert_eq!(controller.snapshot().status, FetchStatus::Success);
}

#[tokio::test(start_paused = true)]
async fn superseded_response_is_discarded() {
    let (source, controller) = controller(vec![
        Scripted::Delayed(Duration::from_secs(5), feed_body(features(4))),
        Scripted::Body(feed_body(vec![feature("fresh", 2.0, "Fresh")])),
    ]);

    let slow = controller.fetch_now();
    let fast = controller.fetch_now();

    assert_eq!(
        fast.await.unwrap(),
        FetchOutcome::Applied {
            seq: 2,
            events: 1,
            rejected: 0,
        }
    );
    assert_eq!(
        slow.await.unwrap(),
        FetchOutcome::Superseded { seq: 1, latest: 2 }
    );

    let snap = controller.snapshot();
    assert_eq!(snap.events.len(), 1);
    assert_eq!(snap.applied_seq, 2);
    assert_eq!(source.calls(), 2);
    assert_eq!(controller.latest_issued(), 2);
}

#[tokio::test]
async fn every_call_reaches_the_source_once() {
    let (source, controller) = controller(vec![]);

    for _ in 0..3 {
        controller.fetch().await;
    }

    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn subscribers_see_each_publication() {
    let (_, controller) = controller(vec![Scripted::Body(feed_body(features(1)))]);
    let mut rx = controller.subscribe();
    let before = *rx.borrow_and_update();

    controller.fetch().await;

    assert!(rx.has_changed().unwrap());
    // Loading, then Success.
    assert_eq!(*rx.borrow_and_update(), before + 2);
}
