use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use seance_core::models::{
    course::{Course, CourseScheduleResponse},
    schedule::{Occurrence, OccurrenceDisplay},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCourse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub price: f64,
    pub max_students: i32,
    pub sessions_per_day: i32,
    pub week_days: Vec<String>,
    pub vacations: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub session_id: Uuid,
    pub coach_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCourseSchedule {
    pub id: Uuid,
    pub course_id: Uuid,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Column values for a new course row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub price: f64,
    pub max_students: i32,
    pub sessions_per_day: i32,
    pub week_days: Vec<String>,
    pub vacations: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub session_id: Uuid,
    pub coach_id: Uuid,
}

/// Partial update of a course row. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub max_students: Option<i32>,
    pub sessions_per_day: Option<i32>,
    pub week_days: Option<Vec<String>>,
    pub vacations: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub coach_id: Option<Uuid>,
}

impl CourseChanges {
    /// Overlays the changes onto a stored course.
    pub fn apply(&self, course: &DbCourse) -> DbCourse {
        DbCourse {
            id: course.id,
            name: self.name.clone().unwrap_or_else(|| course.name.clone()),
            description: self.description.clone().or_else(|| course.description.clone()),
            image_url: self.image_url.clone().or_else(|| course.image_url.clone()),
            location: self.location.clone().or_else(|| course.location.clone()),
            price: self.price.unwrap_or(course.price),
            max_students: self.max_students.unwrap_or(course.max_students),
            sessions_per_day: self.sessions_per_day.unwrap_or(course.sessions_per_day),
            week_days: self.week_days.clone().unwrap_or_else(|| course.week_days.clone()),
            vacations: self.vacations.clone().unwrap_or_else(|| course.vacations.clone()),
            start_date: self.start_date.or(course.start_date),
            end_date: self.end_date.or(course.end_date),
            session_id: course.session_id,
            coach_id: self.coach_id.unwrap_or(course.coach_id),
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

impl From<DbCourse> for Course {
    fn from(course: DbCourse) -> Self {
        Course {
            id: course.id,
            name: course.name,
            description: course.description,
            image_url: course.image_url,
            location: course.location,
            price: course.price,
            max_students: course.max_students,
            sessions_per_day: course.sessions_per_day,
            week_days: course.week_days,
            vacations: course.vacations,
            start_date: course.start_date,
            end_date: course.end_date,
            session_id: course.session_id,
            coach_id: course.coach_id,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

impl DbCourseSchedule {
    pub fn occurrence(&self) -> Occurrence {
        Occurrence {
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    /// Response shape with times rendered on the wall clock of `offset`.
    pub fn into_response(self, offset: FixedOffset) -> CourseScheduleResponse {
        CourseScheduleResponse {
            id: self.id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            display: OccurrenceDisplay::new(self.date, self.start_time, self.end_time, offset),
        }
    }
}
