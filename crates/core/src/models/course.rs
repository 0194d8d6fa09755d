use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::schedule::OccurrenceDisplay;
use crate::recurrence::DateInput;

pub const DEFAULT_MAX_STUDENTS: i32 = 30;
pub const DEFAULT_SESSIONS_PER_DAY: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub max_students: Option<i32>,
    pub sessions_per_day: Option<i32>,
    #[serde(default)]
    pub week_days: Vec<String>,
    #[serde(default)]
    pub vacations: Vec<String>,
    pub start_date: Option<DateInput>,
    pub end_date: Option<DateInput>,
    pub session_id: Uuid,
    pub coach_id: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub max_students: Option<i32>,
    pub sessions_per_day: Option<i32>,
    pub week_days: Option<Vec<String>>,
    pub vacations: Option<Vec<String>>,
    pub start_date: Option<DateInput>,
    pub end_date: Option<DateInput>,
    pub coach_id: Option<Uuid>,
    #[serde(default)]
    pub regenerate_schedules: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseResponse {
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
    pub schedules: Vec<CourseScheduleResponse>,
}

impl CourseResponse {
    pub fn new(course: Course, schedules: Vec<CourseScheduleResponse>) -> Self {
        Self {
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
            schedules,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseScheduleResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub display: OccurrenceDisplay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCourseScheduleRequest {
    pub date: DateInput,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: Uuid,
    pub deleted: bool,
}
