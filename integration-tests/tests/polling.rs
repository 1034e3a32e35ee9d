use integration_tests::harness::fixtures::{three_quakes, two_quakes};
use integration_tests::harness::{CannedResponse, FeedServer, TestDashboard};
use pretty_assertions::assert_eq;
use quakewatch_core::controller::FetchStatus;
use std::time::Duration;

const POLL: Duration = Duration::from_millis(200);

/// New data on the feed shows up without a manual refresh.
#[tokio::test(flavor = "multi_thread")]
async fn polling_picks_up_new_events() {
    // Arrange
    let feed = FeedServer::start(vec![CannedResponse::ok(two_quakes())]);
    let mut dash = TestDashboard::start(&feed.url());
    dash.wait_for(|v| v.status == FetchStatus::Success).await;

    // Act
    dash.dashboard_mut().set_polling(true, POLL).unwrap();
    feed.set_responses(vec![CannedResponse::ok(three_quakes())]);
    let view = dash.wait_for(|v| v.total_events == 3).await;

    // Assert
    assert!(dash.dashboard().is_polling());
    assert_eq!(view.status, FetchStatus::Success);
    assert!(feed.hits() >= 2);
}

/// Once stopped, the feed is no longer hit.
#[tokio::test(flavor = "multi_thread")]
async fn stopping_polling_stops_requests() {
    // Arrange
    let feed = FeedServer::start(vec![CannedResponse::ok(two_quakes())]);
    let mut dash = TestDashboard::start(&feed.url());
    dash.wait_for(|v| v.status == FetchStatus::Success).await;
    dash.dashboard_mut().set_polling(true, POLL).unwrap();
    tokio::time::sleep(POLL * 3).await;

    // Act
    dash.dashboard_mut().set_polling(false, POLL).unwrap();
    // let any fetch already in flight land
    tokio::time::sleep(POLL).await;
    let hits_after_stop = feed.hits();
    tokio::time::sleep(POLL * 4).await;

    // Assert
    assert!(!dash.dashboard().is_polling());
    assert!(hits_after_stop >= 2, "polling never fired");
    assert_eq!(feed.hits(), hits_after_stop);
}

/// Polling keeps retrying through outages and the last good data survives.
#[tokio::test(flavor = "multi_thread")]
async fn polling_survives_outage() {
    let feed = FeedServer::start(vec![CannedResponse::ok(two_quakes())]);
    let mut dash = TestDashboard::start(&feed.url());
    dash.wait_for(|v| v.status == FetchStatus::Success).await;

    dash.dashboard_mut().set_polling(true, POLL).unwrap();
    feed.set_responses(vec![CannedResponse::status(500)]);
    let failed = dash.wait_for(|v| v.status == FetchStatus::Failure).await;
    assert_eq!(failed.total_events, 2);

    feed.set_responses(vec![CannedResponse::ok(three_quakes())]);
    let recovered = dash
        .wait_for(|v| v.status == FetchStatus::Success && v.total_events == 3)
        .await;
    assert_eq!(recovered.error, None);

    dash.dashboard_mut().shutdown();
    assert!(!dash.dashboard().is_polling());
}
