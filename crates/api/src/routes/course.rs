use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/courses",
            post(handlers::course::create_course).get(handlers::course::list_courses),
        )
        .route(
            "/api/courses/:id",
            get(handlers::course::get_course)
                .put(handlers::course::update_course)
                .delete(handlers::course::delete_course),
        )
        .route(
            "/api/courses/:id/schedules",
            post(handlers::course::add_course_schedule),
        )
        .route(
            "/api/courses/:id/schedules/:schedule_id",
            delete(handlers::course::delete_course_schedule),
        )
}
