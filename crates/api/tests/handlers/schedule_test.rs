use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use seance_core::models::schedule::{PreviewScheduleResponse, SlotTableResponse};
use serde_json::{json, Value};

use crate::test_utils::{date, test_server};

#[tokio::test]
async fn test_list_slots() {
    let server = test_server();

    let response = server.get("/api/slots").await;

    response.assert_status_ok();
    let body: SlotTableResponse = response.json();
    assert_eq!(body.utc_offset, "+01:00");
    assert_eq!(
        body.slots
            .iter()
            .map(|slot| (slot.name.as_str(), slot.start.as_str(), slot.end.as_str()))
            .collect::<Vec<_>>(),
        vec![
            ("avant-midi", "06:00", "08:30"),
            ("apres-midi", "16:30", "19:00"),
            ("samedi", "08:00", "10:30"),
        ]
    );
}

#[tokio::test]
async fn test_preview_mondays_in_march() {
    let server = test_server();

    let response = server
        .post("/api/schedules/preview")
        .json(&json!({
            "start_date": "2024-03-01",
            "end_date": "2024-03-21",
            "week_days": ["lundi"],
            "vacations": ["avant-midi", "samedi"]
        }))
        .await;

    response.assert_status_ok();
    let body: PreviewScheduleResponse = response.json();
    assert_eq!(body.count, 6);
    assert_eq!(body.occurrences.len(), 6);

    let first = &body.occurrences[0];
    assert_eq!(first.date, date(2024, 3, 4));
    assert_eq!(first.start_time.to_rfc3339(), "2024-03-04T05:00:00+00:00");
    assert_eq!(first.display.start, "06:00");
    assert_eq!(first.display.end, "08:30");

    let second = &body.occurrences[1];
    assert_eq!(second.date, date(2024, 3, 4));
    assert_eq!(second.display.start, "08:00");
    assert_eq!(second.display.end, "10:30");

    let last = &body.occurrences[5];
    assert_eq!(last.date, date(2024, 3, 18));
    assert_eq!(last.display.date, "18/03/2024");
}

#[tokio::test]
async fn test_preview_accepts_timestamp_dates() {
    let server = test_server();

    let response = server
        .post("/api/schedules/preview")
        .json(&json!({
            "start_date": "2024-03-04T00:00:00.000Z",
            "end_date": "2024-03-04T00:00:00.000Z",
            "week_days": ["lundi"],
            "vacations": ["apres-midi"]
        }))
        .await;

    response.assert_status_ok();
    let body: PreviewScheduleResponse = response.json();
    assert_eq!(body.count, 1);
    assert_eq!(body.occurrences[0].date, date(2024, 3, 4));
    assert_eq!(body.occurrences[0].display.start, "16:30");
}

#[tokio::test]
async fn test_preview_without_weekdays_is_rejected() {
    let server = test_server();

    let response = server
        .post("/api/schedules/preview")
        .json(&json!({
            "start_date": "2024-03-01",
            "end_date": "2024-03-21",
            "vacations": ["avant-midi"]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        json!("Validation error: At least one weekday must be selected")
    );
}

#[tokio::test]
async fn test_preview_with_unknown_vacation_is_rejected() {
    let server = test_server();

    let response = server
        .post("/api/schedules/preview")
        .json(&json!({
            "start_date": "2024-03-01",
            "end_date": "2024-03-21",
            "week_days": ["lundi"],
            "vacations": ["nuit"]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_preview_with_reversed_range_is_empty() {
    let server = test_server();

    let response = server
        .post("/api/schedules/preview")
        .json(&json!({
            "start_date": "2024-03-21",
            "end_date": "2024-03-01",
            "week_days": ["lundi"],
            "vacations": ["avant-midi"]
        }))
        .await;

    response.assert_status_ok();
    let body: PreviewScheduleResponse = response.json();
    assert_eq!(body.count, 0);
    assert!(body.occurrences.is_empty());
}

#[tokio::test]
async fn test_preview_over_too_many_years_is_rejected() {
    let server = test_server();

    let response = server
        .post("/api/schedules/preview")
        .json(&json!({
            "start_date": "0001-01-01",
            "end_date": "9999-12-31",
            "week_days": ["lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche"],
            "vacations": ["avant-midi", "apres-midi", "samedi"]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_version() {
    let server = test_server();

    let response = server.get("/version").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}
