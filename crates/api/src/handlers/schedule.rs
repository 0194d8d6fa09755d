//! # Schedule Handlers
//!
//! Read-only views of the recurrence machinery: the configured vacation
//! slots, and a dry run of the schedule a course form would generate.

use axum::{extract::State, Json};
use seance_core::{
    models::schedule::{
        OccurrenceResponse, PreviewScheduleRequest, PreviewScheduleResponse, SlotResponse,
        SlotTableResponse,
    },
    recurrence::GenerationRequest,
};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// Lists the vacation slots with their wall-clock times.
///
/// # Endpoint
///
/// ```text
/// GET /api/slots
/// ```
#[axum::debug_handler]
pub async fn list_slots(State(state): State<Arc<ApiState>>) -> Json<SlotTableResponse> {
    let slots = state
        .slots
        .iter()
        .map(|slot| SlotResponse {
            name: slot.name.clone(),
            label: slot.label.clone(),
            start: slot.start.format("%H:%M").to_string(),
            end: slot.end.format("%H:%M").to_string(),
        })
        .collect();

    Json(SlotTableResponse {
        utc_offset: state.slots.offset().to_string(),
        slots,
    })
}

/// Expands a recurrence without storing anything.
///
/// The request goes through the same checks as course creation, so the
/// preview shows exactly what saving the form would produce.
///
/// # Endpoint
///
/// ```text
/// POST /api/schedules/preview
/// ```
///
/// # Errors
///
/// * `SeanceError::Validation` - missing dates, a span longer than
///   `MAX_SCHEDULE_DAYS`, no weekday or vacation selected, an unknown weekday,
///   or no configured vacation
#[axum::debug_handler]
pub async fn preview_schedule(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<PreviewScheduleRequest>,
) -> Result<Json<PreviewScheduleResponse>, AppError> {
    let request = GenerationRequest::validated(
        Some(payload.start_date),
        Some(payload.end_date),
        &payload.week_days,
        &payload.vacations,
        &state.slots,
    )?;

    let offset = state.slots.offset();
    let occurrences: Vec<OccurrenceResponse> = request
        .expand(&state.slots)
        .into_iter()
        .map(|occurrence| OccurrenceResponse::new(occurrence, offset))
        .collect();

    tracing::debug!(
        "Previewed {} occurrences from {} to {}",
        occurrences.len(),
        request.start_date,
        request.end_date
    );

    Ok(Json(PreviewScheduleResponse {
        count: occurrences.len(),
        occurrences,
    }))
}
