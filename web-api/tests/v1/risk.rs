use reqwest::StatusCode;
use chrono::{DateTime, TimeZone, Utc};
use risk_core::test_helper::{report, InMemoryStore};
use risk_core::RiskConfig;
use web_api::error::{ApiError, ErrorResponse};
use web_api::routes::v1::risk::{AssessmentStatus, InstantRisk, RiskSummary};

use super::helper::TestHelper;

fn ts(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 18, hour, 0, 0).unwrap()
}

// 0.0045 degrees of latitude is roughly 0.5 km, 0.018 roughly 2 km.

#[tokio::test]
async fn test_risk_by_vessel_flags_close_companion() {
    let store = InMemoryStore::with_reports(vec![
        report(111, "Aurora", ts(10), 60.0, 5.0),
        report(222, "Borealis", ts(10), 60.0045, 5.0),
    ]);
    let helper = TestHelper::spawn(store).await;

    let response = helper.get_risk_by_vessel("111").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: RiskSummary = response.json().await.unwrap();

    assert_eq!(body.status, AssessmentStatus::Risk);
    assert!(body.alert);
    assert_eq!(body.total_encounters, 1);
    assert_eq!(body.flagged_timestamps, vec![ts(10)]);
    assert_eq!(body.top_offending_vessels.len(), 1);
    assert_eq!(body.top_offending_vessels[0].mmsi, Some(222));
    assert_eq!(body.top_offending_vessels[0].vessel_name, "Borealis");
    assert!(body.closest_approach_km.unwrap() < 1.0);
}

#[tokio::test]
async fn test_risk_by_vessel_reports_clean_route_with_closest_approach() {
    let store = InMemoryStore::with_reports(vec![
        report(111, "Aurora", ts(10), 60.0, 5.0),
        report(222, "Borealis", ts(10), 60.018, 5.0),
    ]);
    let helper = TestHelper::spawn(store).await;

    let response = helper.get_risk_by_vessel("111").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: RiskSummary = response.json().await.unwrap();

    assert_eq!(body.status, AssessmentStatus::Clean);
    assert!(!body.alert);
    assert_eq!(body.message, "Clean route. No risk detected.");
    assert_eq!(body.total_encounters, 0);
    assert!(body.flagged_timestamps.is_empty());

    let closest = body.closest_approach_km.unwrap();
    assert!((1.9..2.1).contains(&closest));
}

#[tokio::test]
async fn test_risk_by_vessel_without_shared_timestamps_has_no_closest_approach() {
    let store = InMemoryStore::with_reports(vec![
        report(111, "Aurora", ts(10), 60.0, 5.0),
        report(222, "Borealis", ts(11), 60.0045, 5.0),
    ]);
    let helper = TestHelper::spawn(store).await;

    let response = helper.get_risk_by_vessel("111").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: RiskSummary = response.json().await.unwrap();

    assert_eq!(body.status, AssessmentStatus::Clean);
    assert!(!body.alert);
    assert_eq!(body.closest_approach_km, None);
    assert_eq!(body.sampled_reports, 1);
}

#[tokio::test]
async fn test_risk_by_vessel_distinguishes_unknown_vessel_from_clean() {
    let store = InMemoryStore::with_reports(vec![report(111, "Aurora", ts(10), 60.0, 5.0)]);
    let helper = TestHelper::spawn(store).await;

    let response = helper.get_risk_by_vessel("999").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: RiskSummary = response.json().await.unwrap();

    assert_eq!(body.status, AssessmentStatus::NotFound);
    assert!(!body.alert);
    assert_eq!(body.message, "Ship not found.");
    assert_eq!(body.sampled_reports, 0);
    assert_eq!(body.closest_approach_km, None);
}

#[tokio::test]
async fn test_risk_by_vessel_matches_names_case_and_whitespace_insensitively() {
    let store = InMemoryStore::with_reports(vec![
        report(111, " Aurora ", ts(10), 60.0, 5.0),
        report(222, "Borealis", ts(10), 60.0045, 5.0),
    ]);
    let helper = TestHelper::spawn(store).await;

    let response = helper.get_risk_by_vessel("  aurora  ").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: RiskSummary = response.json().await.unwrap();

    assert_eq!(body.status, AssessmentStatus::Risk);
    assert_eq!(body.sampled_reports, 1);
}

#[tokio::test]
async fn test_risk_by_vessel_flags_each_shared_timestamp_once() {
    let store = InMemoryStore::with_reports(vec![
        report(111, "Aurora", ts(10), 60.0, 5.0),
        report(111, "Aurora", ts(11), 61.0, 5.0),
        report(111, "Aurora", ts(12), 62.0, 5.0),
        report(222, "Borealis", ts(10), 60.0045, 5.0),
        report(333, "Castor", ts(11), 61.0045, 5.0),
        report(444, "Deneb", ts(12), 62.0045, 5.0),
    ]);
    let helper = TestHelper::spawn(store).await;

    let response = helper.get_risk_by_vessel("111").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: RiskSummary = response.json().await.unwrap();

    assert_eq!(body.total_encounters, 3);
    assert_eq!(body.flagged_timestamps, vec![ts(10), ts(11), ts(12)]);
    assert_eq!(body.sampled_reports, 3);
}

#[tokio::test]
async fn test_risk_by_vessel_truncates_flagged_timestamps_but_not_totals() {
    let store = InMemoryStore::with_reports(vec![
        report(111, "Aurora", ts(10), 60.0, 5.0),
        report(111, "Aurora", ts(11), 61.0, 5.0),
        report(111, "Aurora", ts(12), 62.0, 5.0),
        report(222, "Borealis", ts(10), 60.0045, 5.0),
        report(222, "Borealis", ts(11), 61.0045, 5.0),
        report(333, "Castor", ts(12), 62.0045, 5.0),
    ]);
    let helper = TestHelper::spawn_with_config(
        store,
        RiskConfig {
            flagged_timestamps_cap: 2,
            top_offenders_limit: 1,
            ..RiskConfig::default()
        },
    )
    .await;

    let response = helper.get_risk_by_vessel("111").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: RiskSummary = response.json().await.unwrap();

    assert!(body.alert);
    assert_eq!(body.total_encounters, 3);
    assert_eq!(body.flagged_timestamps, vec![ts(10), ts(11)]);
    assert_eq!(body.top_offending_vessels.len(), 1);
    assert_eq!(body.top_offending_vessels[0].mmsi, Some(222));
    assert_eq!(body.top_offending_vessels[0].encounters, 2);
}

#[tokio::test]
async fn test_risk_by_vessel_without_identifier_returns_bad_request() {
    let helper = TestHelper::spawn(InMemoryStore::new()).await;

    let response = helper.get_risk_by_vessel_without_params().await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unavailable_store_returns_internal_server_error() {
    let helper = TestHelper::spawn(InMemoryStore::unavailable()).await;

    let response = helper.get_risk_by_vessel("111").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = response.json().await.unwrap();
    assert!(matches!(body.error, ApiError::InternalServerError));
    assert!(!body.description.is_empty());

    let response = helper
        .get_risk_by_datetime("111", "2025-09-18T10:00:00Z")
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = response.json().await.unwrap();
    assert!(matches!(body.error, ApiError::InternalServerError));
}

#[tokio::test]
async fn test_risk_by_datetime_returns_qualifying_companions() {
    let store = InMemoryStore::with_reports(vec![
        report(111, "Aurora", ts(10), 60.0, 5.0),
        report(222, "Borealis", ts(10), 60.0045, 5.0),
        report(333, "Castor", ts(10), 60.018, 5.0),
    ]);
    let helper = TestHelper::spawn(store).await;

    let response = helper
        .get_risk_by_datetime("111", "2025-09-18T10:00:00Z")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: InstantRisk = response.json().await.unwrap();

    assert_eq!(body.status, AssessmentStatus::Risk);
    assert!(body.alert);
    assert_eq!(body.message, "Risk detected.");
    assert_eq!(body.qualifying_companions.len(), 1);
    assert_eq!(body.qualifying_companions[0].mmsi, Some(222));
    assert!(body.qualifying_companions[0].distance_km < 1.0);
}

#[tokio::test]
async fn test_risk_by_datetime_accepts_space_separated_timestamps() {
    let store = InMemoryStore::with_reports(vec![
        report(111, "Aurora", ts(10), 60.0, 5.0),
        report(222, "Borealis", ts(10), 60.0045, 5.0),
    ]);
    let helper = TestHelper::spawn(store).await;

    let response = helper
        .get_risk_by_datetime("111", "2025-09-18 10:00:00")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: InstantRisk = response.json().await.unwrap();

    assert!(body.alert);
}

#[tokio::test]
async fn test_risk_by_datetime_reports_not_found_for_unknown_instant() {
    let store = InMemoryStore::with_reports(vec![report(111, "Aurora", ts(10), 60.0, 5.0)]);
    let helper = TestHelper::spawn(store).await;

    let response = helper
        .get_risk_by_datetime("111", "2025-09-18T11:00:00Z")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: InstantRisk = response.json().await.unwrap();

    assert_eq!(body.status, AssessmentStatus::NotFound);
    assert!(!body.alert);
    assert_eq!(body.message, "Ship or datetime not found.");
    assert!(body.qualifying_companions.is_empty());
}

#[tokio::test]
async fn test_risk_by_datetime_with_invalid_timestamp_returns_bad_request() {
    let helper = TestHelper::spawn(InMemoryStore::new()).await;

    let response = helper.get_risk_by_datetime("111", "yesterday").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
