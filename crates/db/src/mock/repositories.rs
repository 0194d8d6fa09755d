use mockall::mock;
use seance_core::models::schedule::Occurrence;
use uuid::Uuid;

use crate::models::{CourseChanges, DbCourse, DbCourseSchedule, NewCourse};

// Mock repositories for testing
mock! {
    pub CourseRepo {
        pub async fn create_course(
            &self,
            course: NewCourse,
            occurrences: Vec<Occurrence>,
        ) -> eyre::Result<(DbCourse, Vec<DbCourseSchedule>)>;

        pub async fn get_course_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbCourse>>;

        pub async fn list_courses(&self) -> eyre::Result<Vec<DbCourse>>;

        pub async fn update_course(
            &self,
            id: Uuid,
            changes: CourseChanges,
        ) -> eyre::Result<DbCourse>;

        pub async fn update_course_with_schedules(
            &self,
            id: Uuid,
            changes: CourseChanges,
            occurrences: Vec<Occurrence>,
        ) -> eyre::Result<(DbCourse, Vec<DbCourseSchedule>)>;

        pub async fn delete_course(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;
    }
}

mock! {
    pub CourseScheduleRepo {
        pub async fn create_course_schedule(
            &self,
            course_id: Uuid,
            occurrence: Occurrence,
        ) -> eyre::Result<DbCourseSchedule>;

        pub async fn get_schedules_by_course_id(
            &self,
            course_id: Uuid,
        ) -> eyre::Result<Vec<DbCourseSchedule>>;

        pub async fn replace_course_schedules(
            &self,
            course_id: Uuid,
            occurrences: Vec<Occurrence>,
        ) -> eyre::Result<Vec<DbCourseSchedule>>;

        pub async fn delete_course_schedule(
            &self,
            course_id: Uuid,
            schedule_id: Uuid,
        ) -> eyre::Result<bool>;
    }
}
