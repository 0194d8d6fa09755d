//! # Course Handlers
//!
//! CRUD for courses. A course whose form carries a complete recurrence
//! (start and end dates, weekdays and vacations) gets its sessions generated
//! on creation, and regenerated on update when the caller asks for it.
//! Regeneration replaces the stored sessions wholesale, in the same
//! transaction that writes the new recurrence onto the course.

use axum::{
    extract::{Path, State},
    Json,
};
use seance_core::{
    errors::{SeanceError, SeanceResult},
    models::{
        course::{
            AddCourseScheduleRequest, CourseResponse, CourseScheduleResponse, CreateCourseRequest,
            DEFAULT_MAX_STUDENTS, DEFAULT_SESSIONS_PER_DAY, DeleteResponse, UpdateCourseRequest,
        },
        schedule::Occurrence,
    },
    recurrence::{DateInput, GenerationRequest, SlotTable},
};
use seance_db::{
    models::{CourseChanges, DbCourse, DbCourseSchedule, NewCourse},
    repositories::{course as course_repo, course_schedule as schedule_repo},
};
use std::{collections::HashMap, sync::Arc};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Checks the plain course fields shared by creation and update.
pub fn validate_course_fields(
    name: Option<&str>,
    price: Option<f64>,
    max_students: Option<i32>,
    sessions_per_day: Option<i32>,
) -> SeanceResult<()> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(SeanceError::Validation("Course name is required".to_string()));
        }
    }
    if let Some(price) = price {
        if !price.is_finite() || price < 0.0 {
            return Err(SeanceError::Validation(
                "Price must be a non-negative amount".to_string(),
            ));
        }
    }
    if matches!(max_students, Some(n) if n < 1) {
        return Err(SeanceError::Validation(
            "Maximum number of students must be at least 1".to_string(),
        ));
    }
    if matches!(sessions_per_day, Some(n) if n < 1) {
        return Err(SeanceError::Validation(
            "Sessions per day must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Turns a creation form into the course row and the sessions to store with it.
///
/// Sessions are only generated when the recurrence is complete; a complete
/// but invalid recurrence is rejected.
pub fn prepare_course(
    payload: &CreateCourseRequest,
    slots: &SlotTable,
) -> SeanceResult<(NewCourse, Vec<Occurrence>)> {
    validate_course_fields(
        Some(&payload.name),
        payload.price,
        payload.max_students,
        payload.sessions_per_day,
    )?;

    let occurrences = if GenerationRequest::is_complete(
        payload.start_date.as_ref(),
        payload.end_date.as_ref(),
        &payload.week_days,
        &payload.vacations,
    ) {
        GenerationRequest::validated(
            payload.start_date,
            payload.end_date,
            &payload.week_days,
            &payload.vacations,
            slots,
        )?
        .expand(slots)
    } else {
        Vec::new()
    };

    let course = NewCourse {
        name: payload.name.trim().to_string(),
        description: payload.description.clone(),
        image_url: payload.image_url.clone(),
        location: payload.location.clone(),
        price: payload.price.unwrap_or(0.0),
        max_students: payload.max_students.unwrap_or(DEFAULT_MAX_STUDENTS),
        sessions_per_day: payload.sessions_per_day.unwrap_or(DEFAULT_SESSIONS_PER_DAY),
        week_days: payload.week_days.clone(),
        vacations: payload.vacations.clone(),
        start_date: payload.start_date.map(|d| d.date()),
        end_date: payload.end_date.map(|d| d.date()),
        session_id: payload.session_id,
        coach_id: payload.coach_id,
    };

    Ok((course, occurrences))
}

/// Field changes requested by an update form.
pub fn course_changes(payload: &UpdateCourseRequest) -> SeanceResult<CourseChanges> {
    validate_course_fields(
        payload.name.as_deref(),
        payload.price,
        payload.max_students,
        payload.sessions_per_day,
    )?;

    Ok(CourseChanges {
        name: payload.name.as_ref().map(|name| name.trim().to_string()),
        description: payload.description.clone(),
        image_url: payload.image_url.clone(),
        location: payload.location.clone(),
        price: payload.price,
        max_students: payload.max_students,
        sessions_per_day: payload.sessions_per_day,
        week_days: payload.week_days.clone(),
        vacations: payload.vacations.clone(),
        start_date: payload.start_date.map(|d| d.date()),
        end_date: payload.end_date.map(|d| d.date()),
        coach_id: payload.coach_id,
    })
}

/// The recurrence to regenerate from: values in the update form win over
/// the stored ones.
pub fn regeneration_request(
    payload: &UpdateCourseRequest,
    stored: &DbCourse,
    slots: &SlotTable,
) -> SeanceResult<GenerationRequest> {
    let start_date = payload
        .start_date
        .or_else(|| stored.start_date.map(DateInput::from));
    let end_date = payload
        .end_date
        .or_else(|| stored.end_date.map(DateInput::from));
    let week_days = payload.week_days.as_ref().unwrap_or(&stored.week_days);
    let vacations = payload.vacations.as_ref().unwrap_or(&stored.vacations);

    GenerationRequest::validated(start_date, end_date, week_days, vacations, slots)
}

fn course_response(
    course: DbCourse,
    schedules: Vec<DbCourseSchedule>,
    slots: &SlotTable,
) -> CourseResponse {
    let offset = slots.offset();
    CourseResponse::new(
        course.into(),
        schedules
            .into_iter()
            .map(|schedule| schedule.into_response(offset))
            .collect(),
    )
}

async fn find_course(state: &ApiState, id: Uuid) -> Result<DbCourse, AppError> {
    course_repo::get_course_by_id(&state.db_pool, id)
        .await
        .map_err(SeanceError::Database)?
        .ok_or_else(|| AppError(SeanceError::NotFound(format!("Course with ID {} not found", id))))
}

#[axum::debug_handler]
pub async fn create_course(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<Json<CourseResponse>, AppError> {
    let (new_course, occurrences) = prepare_course(&payload, &state.slots)?;

    let (db_course, schedules) =
        course_repo::create_course(&state.db_pool, &new_course, &occurrences)
            .await
            .map_err(SeanceError::Database)?;

    tracing::info!(
        "Created course {} with {} sessions",
        db_course.id,
        schedules.len()
    );

    Ok(Json(course_response(db_course, schedules, &state.slots)))
}

#[axum::debug_handler]
pub async fn list_courses(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    let courses = course_repo::list_courses(&state.db_pool)
        .await
        .map_err(SeanceError::Database)?;

    let ids: Vec<Uuid> = courses.iter().map(|course| course.id).collect();
    let mut schedules_by_course: HashMap<Uuid, Vec<DbCourseSchedule>> = HashMap::new();
    for schedule in schedule_repo::get_schedules_by_course_ids(&state.db_pool, &ids)
        .await
        .map_err(SeanceError::Database)?
    {
        schedules_by_course
            .entry(schedule.course_id)
            .or_default()
            .push(schedule);
    }

    let response = courses
        .into_iter()
        .map(|course| {
            let schedules = schedules_by_course.remove(&course.id).unwrap_or_default();
            course_response(course, schedules, &state.slots)
        })
        .collect();

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_course(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseResponse>, AppError> {
    let course = find_course(&state, id).await?;

    let schedules = schedule_repo::get_schedules_by_course_id(&state.db_pool, id)
        .await
        .map_err(SeanceError::Database)?;

    Ok(Json(course_response(course, schedules, &state.slots)))
}

#[axum::debug_handler]
pub async fn update_course(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, AppError> {
    let stored = find_course(&state, id).await?;
    let changes = course_changes(&payload)?;

    let (course, schedules) = if payload.regenerate_schedules {
        let request = regeneration_request(&payload, &stored, &state.slots)?;
        let occurrences = request.expand(&state.slots);

        let (course, schedules) =
            course_repo::update_course_with_schedules(&state.db_pool, id, &changes, &occurrences)
                .await
                .map_err(SeanceError::Database)?;

        tracing::info!("Regenerated {} sessions for course {}", schedules.len(), id);
        (course, schedules)
    } else {
        let course = course_repo::update_course(&state.db_pool, id, &changes)
            .await
            .map_err(SeanceError::Database)?;

        let schedules = schedule_repo::get_schedules_by_course_id(&state.db_pool, id)
            .await
            .map_err(SeanceError::Database)?;

        (course, schedules)
    };

    Ok(Json(course_response(course, schedules, &state.slots)))
}

#[axum::debug_handler]
pub async fn delete_course(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = course_repo::delete_course(&state.db_pool, id)
        .await
        .map_err(SeanceError::Database)?;

    if !deleted {
        return Err(AppError(SeanceError::NotFound(format!(
            "Course with ID {} not found",
            id
        ))));
    }

    tracing::info!("Deleted course {}", id);
    Ok(Json(DeleteResponse { id, deleted }))
}

/// Checks a manually entered session and pins it to its calendar date.
pub fn manual_occurrence(payload: &AddCourseScheduleRequest) -> SeanceResult<Occurrence> {
    if payload.start_time >= payload.end_time {
        return Err(SeanceError::Validation(
            "A session must start before it ends".to_string(),
        ));
    }

    Ok(Occurrence {
        date: payload.date.date(),
        start_time: payload.start_time,
        end_time: payload.end_time,
    })
}

#[axum::debug_handler]
pub async fn add_course_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddCourseScheduleRequest>,
) -> Result<Json<CourseScheduleResponse>, AppError> {
    let occurrence = manual_occurrence(&payload)?;
    find_course(&state, id).await?;

    let schedule = schedule_repo::create_course_schedule(&state.db_pool, id, &occurrence)
        .await
        .map_err(SeanceError::Database)?;

    Ok(Json(schedule.into_response(state.slots.offset())))
}

#[axum::debug_handler]
pub async fn delete_course_schedule(
    State(state): State<Arc<ApiState>>,
    Path((id, schedule_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = schedule_repo::delete_course_schedule(&state.db_pool, id, schedule_id)
        .await
        .map_err(SeanceError::Database)?;

    if !deleted {
        return Err(AppError(SeanceError::NotFound(format!(
            "Session {} of course {} not found",
            schedule_id, id
        ))));
    }

    Ok(Json(DeleteResponse {
        id: schedule_id,
        deleted,
    }))
}
