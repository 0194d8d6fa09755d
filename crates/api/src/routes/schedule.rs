use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/slots", get(handlers::schedule::list_slots))
        .route(
            "/api/schedules/preview",
            post(handlers::schedule::preview_schedule),
        )
}
