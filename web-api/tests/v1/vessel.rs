use reqwest::StatusCode;
use chrono::{DateTime, TimeZone, Utc};
use risk_core::test_helper::{report, InMemoryStore};
use web_api::routes::v1::vessel::VesselPosition;

use super::helper::TestHelper;

fn ts(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 18, hour, 0, 0).unwrap()
}

#[tokio::test]
async fn test_vessel_positions_are_ordered_ascending() {
    let store = InMemoryStore::with_reports(vec![
        report(111, "Aurora", ts(12), 62.0, 5.0),
        report(111, "Aurora", ts(10), 60.0, 5.0),
        report(111, "Aurora", ts(11), 61.0, 5.0),
    ]);
    let helper = TestHelper::spawn(store).await;

    let response = helper.get_vessel_positions("111", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<VesselPosition> = response.json().await.unwrap();

    assert_eq!(body.len(), 3);
    assert_eq!(
        body.iter().map(|p| p.timestamp).collect::<Vec<_>>(),
        vec![ts(10), ts(11), ts(12)]
    );
}

#[tokio::test]
async fn test_vessel_positions_honors_limit_keeping_most_recent() {
    let store = InMemoryStore::with_reports(vec![
        report(111, "Aurora", ts(10), 60.0, 5.0),
        report(111, "Aurora", ts(11), 61.0, 5.0),
        report(111, "Aurora", ts(12), 62.0, 5.0),
    ]);
    let helper = TestHelper::spawn(store).await;

    let response = helper.get_vessel_positions("111", Some(2)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<VesselPosition> = response.json().await.unwrap();

    assert_eq!(
        body.iter().map(|p| p.timestamp).collect::<Vec<_>>(),
        vec![ts(11), ts(12)]
    );
}

#[tokio::test]
async fn test_vessel_positions_supports_name_lookup() {
    let store = InMemoryStore::with_reports(vec![
        report(111, "Aurora", ts(10), 60.0, 5.0),
        report(222, "Borealis", ts(10), 61.0, 5.0),
    ]);
    let helper = TestHelper::spawn(store).await;

    let response = helper.get_vessel_positions("aurora", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<VesselPosition> = response.json().await.unwrap();

    assert_eq!(body.len(), 1);
    assert_eq!(body[0].mmsi, Some(111));
}

#[tokio::test]
async fn test_vessel_positions_returns_empty_list_for_unknown_vessel() {
    let store = InMemoryStore::with_reports(vec![report(111, "Aurora", ts(10), 60.0, 5.0)]);
    let helper = TestHelper::spawn(store).await;

    let response = helper.get_vessel_positions("999", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<VesselPosition> = response.json().await.unwrap();

    assert!(body.is_empty());
}
