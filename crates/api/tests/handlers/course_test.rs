use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use mockall::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use seance_api::handlers::course::{
    course_changes, manual_occurrence, prepare_course, regeneration_request,
    validate_course_fields,
};
use seance_core::{
    errors::SeanceError,
    models::course::{AddCourseScheduleRequest, CreateCourseRequest, UpdateCourseRequest},
    recurrence::DateInput,
};
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{
    course_from_new, date, names, rows_for, stored_course, test_server, TestContext,
};

fn create_request(week_days: &[&str], vacations: &[&str]) -> CreateCourseRequest {
    CreateCourseRequest {
        name: "  Natation débutants ".to_string(),
        description: Some("Cours du matin".to_string()),
        image_url: None,
        location: Some("Piscine municipale".to_string()),
        price: Some(40.0),
        max_students: None,
        sessions_per_day: None,
        week_days: names(week_days),
        vacations: names(vacations),
        start_date: Some(DateInput::Date(date(2024, 3, 1))),
        end_date: Some(DateInput::Date(date(2024, 3, 21))),
        session_id: Uuid::new_v4(),
        coach_id: Uuid::new_v4(),
    }
}

#[tokio::test]
async fn test_create_course_generates_schedule() {
    let mut ctx = TestContext::new();
    let course_id = Uuid::new_v4();

    let (new_course, occurrences) =
        prepare_course(&create_request(&["lundi"], &["avant-midi", "samedi"]), &ctx.slots)
            .expect("Complete course form should be accepted");

    assert_eq!(new_course.name, "Natation débutants");
    assert_eq!(new_course.max_students, 30);
    assert_eq!(new_course.sessions_per_day, 1);
    assert_eq!(new_course.start_date, Some(date(2024, 3, 1)));
    assert_eq!(occurrences.len(), 6);

    ctx.course_repo
        .expect_create_course()
        .times(1)
        .withf(|_, occurrences| occurrences.len() == 6)
        .returning(move |course, occurrences| {
            Ok((course_from_new(course_id, &course), rows_for(course_id, &occurrences)))
        });

    let (db_course, schedules) = ctx
        .course_repo
        .create_course(new_course, occurrences.clone())
        .await
        .unwrap();

    assert_eq!(db_course.id, course_id);
    assert_eq!(schedules.len(), 6);
    assert_eq!(schedules[0].occurrence(), occurrences[0]);
}

#[test]
fn test_create_course_without_recurrence_has_no_schedule() {
    let ctx = TestContext::new();
    let mut request = create_request(&["lundi"], &[]);
    request.end_date = None;

    let (new_course, occurrences) = prepare_course(&request, &ctx.slots).unwrap();

    assert!(occurrences.is_empty());
    assert_eq!(new_course.week_days, names(&["lundi"]));
    assert_eq!(new_course.end_date, None);
}

#[test]
fn test_create_course_without_configured_vacation_is_rejected() {
    let ctx = TestContext::new();

    let result = prepare_course(&create_request(&["lundi"], &["nocturne"]), &ctx.slots);

    assert!(matches!(result, Err(SeanceError::Validation(_))));
}

#[test]
fn test_create_course_with_reversed_range_has_no_schedule() {
    let ctx = TestContext::new();
    let mut request = create_request(&["lundi"], &["avant-midi"]);
    request.start_date = Some(DateInput::Date(date(2024, 3, 21)));
    request.end_date = Some(DateInput::Date(date(2024, 3, 1)));

    let (new_course, occurrences) = prepare_course(&request, &ctx.slots).unwrap();

    assert!(occurrences.is_empty());
    assert_eq!(new_course.start_date, Some(date(2024, 3, 21)));
    assert_eq!(new_course.end_date, Some(date(2024, 3, 1)));
}

#[tokio::test]
async fn test_regenerate_updates_course_and_schedule_together() {
    let mut ctx = TestContext::new();
    let course_id = Uuid::new_v4();
    let stored = stored_course(course_id);

    ctx.course_repo
        .expect_get_course_by_id()
        .with(predicate::eq(course_id))
        .times(1)
        .returning(move |id| Ok(Some(stored_course(id))));

    // Only the weekdays change; dates and vacations come from the stored course
    let payload = UpdateCourseRequest {
        week_days: Some(names(&["mardi", "jeudi"])),
        regenerate_schedules: true,
        ..Default::default()
    };

    let found = ctx.course_repo.get_course_by_id(course_id).await.unwrap().unwrap();
    let changes = course_changes(&payload).unwrap();
    let request = regeneration_request(&payload, &found, &ctx.slots).unwrap();
    assert_eq!(request.start_date, stored.start_date.unwrap());
    assert_eq!(request.vacations, stored.vacations);

    let occurrences = request.expand(&ctx.slots);
    // Tuesdays and Thursdays from 2024-03-01 to 2024-03-21: 5, 7, 12, 14, 19, 21
    assert_eq!(occurrences.len(), 12);

    ctx.course_repo.expect_update_course().times(0);
    ctx.course_repo
        .expect_update_course_with_schedules()
        .with(
            predicate::eq(course_id),
            predicate::eq(changes.clone()),
            predicate::eq(occurrences.clone()),
        )
        .times(1)
        .returning(move |id, changes, occurrences| {
            Ok((changes.apply(&stored_course(id)), rows_for(id, &occurrences)))
        });

    let (course, rows) = ctx
        .course_repo
        .update_course_with_schedules(course_id, changes, occurrences)
        .await
        .unwrap();

    assert_eq!(course.week_days, names(&["mardi", "jeudi"]));
    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|row| row.course_id == course_id));
}

#[tokio::test]
async fn test_regenerate_skips_retired_vacation() {
    let mut ctx = TestContext::new();
    let course_id = Uuid::new_v4();
    let mut stored = stored_course(course_id);
    stored.vacations = names(&["removed-slot", "avant-midi"]);

    let payload = UpdateCourseRequest {
        regenerate_schedules: true,
        ..Default::default()
    };

    let request = regeneration_request(&payload, &stored, &ctx.slots)
        .expect("A course naming a retired slot can still be regenerated");
    let occurrences = request.expand(&ctx.slots);

    let mondays: Vec<_> = occurrences.iter().map(|o| o.date).collect();
    assert_eq!(mondays, vec![date(2024, 3, 4), date(2024, 3, 11), date(2024, 3, 18)]);

    ctx.course_repo
        .expect_update_course_with_schedules()
        .withf(|_, _, occurrences| occurrences.len() == 3)
        .times(1)
        .returning(|id, _, occurrences| Ok((stored_course(id), rows_for(id, &occurrences))));

    let (_, rows) = ctx
        .course_repo
        .update_course_with_schedules(course_id, course_changes(&payload).unwrap(), occurrences)
        .await
        .unwrap();

    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_regenerate_with_empty_vacations_is_rejected() {
    let mut ctx = TestContext::new();
    let stored = stored_course(Uuid::new_v4());

    ctx.course_repo.expect_update_course_with_schedules().times(0);

    let payload = UpdateCourseRequest {
        vacations: Some(vec![]),
        regenerate_schedules: true,
        ..Default::default()
    };

    let result = regeneration_request(&payload, &stored, &ctx.slots);

    match result {
        Err(SeanceError::Validation(message)) => {
            assert_eq!(message, "At least one vacation must be selected")
        }
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[test]
fn test_update_changes_are_trimmed_and_partial() {
    let payload = UpdateCourseRequest {
        name: Some(" Natation avancée ".to_string()),
        max_students: Some(15),
        start_date: Some(DateInput::Timestamp(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap())),
        ..Default::default()
    };

    let changes = course_changes(&payload).unwrap();

    assert_eq!(changes.name.as_deref(), Some("Natation avancée"));
    assert_eq!(changes.max_students, Some(15));
    assert_eq!(changes.start_date, Some(date(2024, 4, 1)));
    assert_eq!(changes.price, None);
    assert_eq!(changes.week_days, None);
}

#[rstest]
#[case(Some("   "), None, None, None)]
#[case(None, Some(-1.0), None, None)]
#[case(None, Some(f64::NAN), None, None)]
#[case(None, None, Some(0), None)]
#[case(None, None, None, Some(0))]
fn test_invalid_course_fields(
    #[case] name: Option<&str>,
    #[case] price: Option<f64>,
    #[case] max_students: Option<i32>,
    #[case] sessions_per_day: Option<i32>,
) {
    let result = validate_course_fields(name, price, max_students, sessions_per_day);

    assert!(matches!(result, Err(SeanceError::Validation(_))));
}

#[test]
fn test_valid_course_fields() {
    assert!(validate_course_fields(Some("Natation"), Some(0.0), Some(30), Some(2)).is_ok());
    assert!(validate_course_fields(None, None, None, None).is_ok());
}

#[test]
fn test_manual_occurrence() {
    let payload = AddCourseScheduleRequest {
        date: DateInput::Timestamp(Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap()),
        start_time: Utc.with_ymd_and_hms(2024, 3, 9, 7, 0, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2024, 3, 9, 9, 30, 0).unwrap(),
    };

    let occurrence = manual_occurrence(&payload).unwrap();

    assert_eq!(occurrence.date, date(2024, 3, 9));
    assert_eq!(occurrence.start_time, payload.start_time);
}

#[test]
fn test_manual_occurrence_must_start_before_end() {
    let start = Utc.with_ymd_and_hms(2024, 3, 9, 9, 0, 0).unwrap();
    let payload = AddCourseScheduleRequest {
        date: DateInput::Date(date(2024, 3, 9)),
        start_time: start,
        end_time: start,
    };

    assert!(matches!(
        manual_occurrence(&payload),
        Err(SeanceError::Validation(_))
    ));
}

#[tokio::test]
async fn test_create_course_endpoint_rejects_blank_name() {
    let server = test_server();

    let response = server
        .post("/api/courses")
        .json(&json!({
            "name": "  ",
            "session_id": Uuid::new_v4(),
            "coach_id": Uuid::new_v4()
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_schedule_endpoint_rejects_inverted_times() {
    let server = test_server();

    let response = server
        .post(&format!("/api/courses/{}/schedules", Uuid::new_v4()))
        .json(&json!({
            "date": "2024-03-09",
            "start_time": "2024-03-09T10:00:00Z",
            "end_time": "2024-03-09T09:00:00Z"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
