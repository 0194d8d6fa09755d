use crate::models::{CourseChanges, DbCourse, DbCourseSchedule, NewCourse};
use crate::repositories::course_schedule::{delete_schedules, insert_schedules};
use chrono::Utc;
use eyre::{eyre, Result};
use seance_core::models::schedule::Occurrence;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

const COURSE_COLUMNS: &str = "id, name, description, image_url, location, price, max_students, \
     sessions_per_day, week_days, vacations, start_date, end_date, session_id, coach_id, \
     created_at, updated_at";

/// Inserts a course together with its generated schedule in one transaction.
pub async fn create_course(
    pool: &Pool<Postgres>,
    course: &NewCourse,
    occurrences: &[Occurrence],
) -> Result<(DbCourse, Vec<DbCourseSchedule>)> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating course: id={}, name={}, occurrences={}",
        id, course.name, occurrences.len()
    );

    let mut tx = pool.begin().await?;

    let db_course = sqlx::query_as::<_, DbCourse>(&format!(
        r#"
        INSERT INTO courses (id, name, description, image_url, location, price, max_students,
            sessions_per_day, week_days, vacations, start_date, end_date, session_id, coach_id,
            created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
        RETURNING {}
        "#,
        COURSE_COLUMNS
    ))
    .bind(id)
    .bind(&course.name)
    .bind(&course.description)
    .bind(&course.image_url)
    .bind(&course.location)
    .bind(course.price)
    .bind(course.max_students)
    .bind(course.sessions_per_day)
    .bind(&course.week_days)
    .bind(&course.vacations)
    .bind(course.start_date)
    .bind(course.end_date)
    .bind(course.session_id)
    .bind(course.coach_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let schedules = insert_schedules(&mut tx, id, occurrences).await?;

    tx.commit().await?;

    tracing::debug!("Course created successfully: id={}", id);
    Ok((db_course, schedules))
}

pub async fn get_course_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbCourse>> {
    tracing::debug!("Getting course by id: {}", id);

    let course = sqlx::query_as::<_, DbCourse>(&format!(
        r#"
        SELECT {}
        FROM courses
        WHERE id = $1
        "#,
        COURSE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if course.is_none() {
        tracing::debug!("Course not found: id={}", id);
    }

    Ok(course)
}

/// All courses, newest first.
pub async fn list_courses(pool: &Pool<Postgres>) -> Result<Vec<DbCourse>> {
    let courses = sqlx::query_as::<_, DbCourse>(&format!(
        r#"
        SELECT {}
        FROM courses
        ORDER BY created_at DESC
        "#,
        COURSE_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(courses)
}

pub async fn update_course(
    pool: &Pool<Postgres>,
    id: Uuid,
    changes: &CourseChanges,
) -> Result<DbCourse> {
    let mut tx = pool.begin().await?;
    let course = update_course_row(&mut tx, id, changes).await?;
    tx.commit().await?;

    Ok(course)
}

/// Applies `changes` and swaps the course's schedule for `occurrences` in one
/// transaction. Either the row and its schedule both change or neither does.
pub async fn update_course_with_schedules(
    pool: &Pool<Postgres>,
    id: Uuid,
    changes: &CourseChanges,
    occurrences: &[Occurrence],
) -> Result<(DbCourse, Vec<DbCourseSchedule>)> {
    let mut tx = pool.begin().await?;

    let course = update_course_row(&mut tx, id, changes).await?;
    let removed = delete_schedules(&mut tx, id).await?;
    let schedules = insert_schedules(&mut tx, id, occurrences).await?;

    tx.commit().await?;

    tracing::debug!(
        "Updated course {} and its schedule: removed={}, inserted={}",
        id,
        removed,
        schedules.len()
    );
    Ok((course, schedules))
}

// Locks the row so concurrent updates merge against the latest values.
async fn update_course_row(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    changes: &CourseChanges,
) -> Result<DbCourse> {
    let course = sqlx::query_as::<_, DbCourse>(&format!(
        r#"
        SELECT {}
        FROM courses
        WHERE id = $1
        FOR UPDATE
        "#,
        COURSE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| eyre!("Course not found"))?;

    let merged = changes.apply(&course);

    let updated_course = sqlx::query_as::<_, DbCourse>(&format!(
        r#"
        UPDATE courses
        SET name = $2, description = $3, image_url = $4, location = $5, price = $6,
            max_students = $7, sessions_per_day = $8, week_days = $9, vacations = $10,
            start_date = $11, end_date = $12, coach_id = $13, updated_at = $14
        WHERE id = $1
        RETURNING {}
        "#,
        COURSE_COLUMNS
    ))
    .bind(id)
    .bind(&merged.name)
    .bind(&merged.description)
    .bind(&merged.image_url)
    .bind(&merged.location)
    .bind(merged.price)
    .bind(merged.max_students)
    .bind(merged.sessions_per_day)
    .bind(&merged.week_days)
    .bind(&merged.vacations)
    .bind(merged.start_date)
    .bind(merged.end_date)
    .bind(merged.coach_id)
    .bind(Utc::now())
    .fetch_one(&mut **tx)
    .await?;

    Ok(updated_course)
}

/// Deletes a course. Its schedule rows go with it through the foreign key.
///
/// Returns `false` when no course had that id.
pub async fn delete_course(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM courses
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
