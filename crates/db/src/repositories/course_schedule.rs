use crate::models::DbCourseSchedule;
use chrono::Utc;
use eyre::Result;
use seance_core::models::schedule::Occurrence;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

pub(crate) async fn insert_schedules(
    tx: &mut Transaction<'_, Postgres>,
    course_id: Uuid,
    occurrences: &[Occurrence],
) -> Result<Vec<DbCourseSchedule>> {
    let now = Utc::now();
    let mut schedules = Vec::with_capacity(occurrences.len());

    for occurrence in occurrences {
        let schedule = sqlx::query_as::<_, DbCourseSchedule>(
            r#"
            INSERT INTO course_schedules (id, course_id, date, start_time, end_time, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, course_id, date, start_time, end_time, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(course_id)
        .bind(occurrence.date)
        .bind(occurrence.start_time)
        .bind(occurrence.end_time)
        .bind(now)
        .fetch_one(&mut **tx)
        .await?;

        schedules.push(schedule);
    }

    Ok(schedules)
}

/// Adds one schedule row to a course.
pub async fn create_course_schedule(
    pool: &Pool<Postgres>,
    course_id: Uuid,
    occurrence: &Occurrence,
) -> Result<DbCourseSchedule> {
    let schedule = sqlx::query_as::<_, DbCourseSchedule>(
        r#"
        INSERT INTO course_schedules (id, course_id, date, start_time, end_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, course_id, date, start_time, end_time, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(course_id)
    .bind(occurrence.date)
    .bind(occurrence.start_time)
    .bind(occurrence.end_time)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(schedule)
}

pub async fn get_schedules_by_course_id(
    pool: &Pool<Postgres>,
    course_id: Uuid,
) -> Result<Vec<DbCourseSchedule>> {
    let schedules = sqlx::query_as::<_, DbCourseSchedule>(
        r#"
        SELECT id, course_id, date, start_time, end_time, created_at
        FROM course_schedules
        WHERE course_id = $1
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .bind(course_id)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

/// Schedule rows of several courses at once, ordered by date.
pub async fn get_schedules_by_course_ids(
    pool: &Pool<Postgres>,
    course_ids: &[Uuid],
) -> Result<Vec<DbCourseSchedule>> {
    let schedules = sqlx::query_as::<_, DbCourseSchedule>(
        r#"
        SELECT id, course_id, date, start_time, end_time, created_at
        FROM course_schedules
        WHERE course_id = ANY($1)
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .bind(course_ids)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

pub(crate) async fn delete_schedules(
    tx: &mut Transaction<'_, Postgres>,
    course_id: Uuid,
) -> Result<u64> {
    let removed = sqlx::query(
        r#"
        DELETE FROM course_schedules
        WHERE course_id = $1
        "#,
    )
    .bind(course_id)
    .execute(&mut **tx)
    .await?
    .rows_affected();

    Ok(removed)
}

/// Replaces every schedule row of a course with `occurrences`.
///
/// The delete and the inserts share one transaction, so a failure leaves the
/// previous schedule untouched.
pub async fn replace_course_schedules(
    pool: &Pool<Postgres>,
    course_id: Uuid,
    occurrences: &[Occurrence],
) -> Result<Vec<DbCourseSchedule>> {
    let mut tx = pool.begin().await?;

    let removed = delete_schedules(&mut tx, course_id).await?;
    let schedules = insert_schedules(&mut tx, course_id, occurrences).await?;

    tx.commit().await?;

    tracing::debug!(
        "Replaced schedule of course {}: removed={}, inserted={}",
        course_id,
        removed,
        schedules.len()
    );
    Ok(schedules)
}

/// Deletes one schedule row of a course. Returns `false` if it did not exist.
pub async fn delete_course_schedule(
    pool: &Pool<Postgres>,
    course_id: Uuid,
    schedule_id: Uuid,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM course_schedules
        WHERE id = $1 AND course_id = $2
        "#,
    )
    .bind(schedule_id)
    .bind(course_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::create_test_pool;
    use crate::models::NewCourse;
    use crate::repositories::course::{create_course, delete_course};
    use chrono::NaiveDate;
    use seance_core::recurrence::{SlotTable, expand_schedule};

    fn new_course(week_days: &[&str], vacations: &[&str]) -> NewCourse {
        NewCourse {
            name: "Natation".to_string(),
            description: None,
            image_url: None,
            location: None,
            price: 0.0,
            max_students: 30,
            sessions_per_day: 1,
            week_days: week_days.iter().map(|d| d.to_string()).collect(),
            vacations: vacations.iter().map(|v| v.to_string()).collect(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 21),
            session_id: Uuid::new_v4(),
            coach_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL database at TEST_DATABASE_URL"]
    async fn replace_discards_previous_rows() {
        let pool = create_test_pool().await;
        let table = SlotTable::default();
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap();

        let first = expand_schedule(start, end, &["lundi"], &["avant-midi", "samedi"], &table);
        let course_form = new_course(&["lundi"], &["avant-midi", "samedi"]);
        let (course, created) = create_course(&pool, &course_form, &first).await.unwrap();
        assert_eq!(created.len(), 6);

        let second = expand_schedule(start, end, &["mardi"], &["apres-midi"], &table);
        replace_course_schedules(&pool, course.id, &second).await.unwrap();

        let stored = get_schedules_by_course_id(&pool, course.id).await.unwrap();
        let stored: Vec<Occurrence> = stored.iter().map(DbCourseSchedule::occurrence).collect();
        assert_eq!(stored, second);

        assert!(delete_course(&pool, course.id).await.unwrap());
        assert!(get_schedules_by_course_id(&pool, course.id).await.unwrap().is_empty());
    }
}
