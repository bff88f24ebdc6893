//! REST handlers.
//!
//! Endpoints:
//! - GET  /api/calcom/event-types - List provider event types
//! - GET  /api/calcom/slots       - List available slots for a date
//! - POST /api/calcom/bookings    - Create a booking
//! - POST /api/chat/message       - One chatbot exchange

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::api::ModelClient;
use crate::calcom::CalendarApi;
use crate::error::CalChatError;
use crate::models::{Attendee, BookingRequest, EventType};
use crate::session::SessionStore;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub event_type_id: i64,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct SlotView {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
}

#[derive(Debug, Deserialize)]
pub struct BookEventRequest {
    pub event_type_id: i64,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub attendees: Vec<Attendee>,
}

#[derive(Debug, Serialize)]
pub struct BookEventResponse {
    pub booking_id: String,
    pub event_title: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub attendees: Vec<Attendee>,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
}

/// GET /api/calcom/event-types
pub async fn list_event_types<M, C, S>(
    State(state): State<AppState<M, C, S>>,
) -> Result<Json<Vec<EventType>>, CalChatError>
where
    M: ModelClient + 'static,
    C: CalendarApi + 'static,
    S: SessionStore + 'static,
{
    let event_types = state.calendar.list_event_types().await?;
    Ok(Json(event_types))
}

/// GET /api/calcom/slots?event_type_id=<int>&date=<YYYY-MM-DD>
///
/// Zero availability is a 200 with an empty array, not an error.
pub async fn list_slots<M, C, S>(
    State(state): State<AppState<M, C, S>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Vec<SlotView>>, CalChatError>
where
    M: ModelClient + 'static,
    C: CalendarApi + 'static,
    S: SessionStore + 'static,
{
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d").map_err(|_| {
        CalChatError::Validation(format!(
            "Invalid date format: {}. Expected format: YYYY-MM-DD",
            query.date
        ))
    })?;

    let slots = state
        .calendar
        .list_slots(query.event_type_id, date, state.default_timezone())
        .await?;

    let views = slots
        .into_iter()
        .map(|slot| SlotView {
            start_time: slot.start,
            end_time: slot.end,
        })
        .collect();
    Ok(Json(views))
}

/// POST /api/calcom/bookings
pub async fn create_booking<M, C, S>(
    State(state): State<AppState<M, C, S>>,
    Json(request): Json<BookEventRequest>,
) -> Result<(StatusCode, Json<BookEventResponse>), CalChatError>
where
    M: ModelClient + 'static,
    C: CalendarApi + 'static,
    S: SessionStore + 'static,
{
    if request.attendees.is_empty() {
        return Err(CalChatError::Validation(
            "At least one attendee is required".to_string(),
        ));
    }
    if request.end_time <= request.start_time {
        return Err(CalChatError::Validation(
            "end_time must be after start_time".to_string(),
        ));
    }

    let booking_request = BookingRequest {
        event_type_id: request.event_type_id,
        start_time: request.start_time,
        end_time: request.end_time,
        title: request.title,
        description: request.description,
        attendees: request.attendees.clone(),
    };

    let booking = state.calendar.create_booking(&booking_request).await?;

    let response = BookEventResponse {
        booking_id: booking.uid,
        event_title: booking.title,
        start_time: booking.start_time,
        end_time: booking.end_time,
        attendees: request.attendees,
        status: booking.status,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/chat/message
pub async fn chat_message<M, C, S>(
    State(state): State<AppState<M, C, S>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, CalChatError>
where
    M: ModelClient + 'static,
    C: CalendarApi + 'static,
    S: SessionStore + 'static,
{
    if request.message.trim().is_empty() {
        return Err(CalChatError::Validation("message must not be empty".to_string()));
    }

    let reply = state
        .orchestrator
        .process_message(&request.message, request.session_id)
        .await?;

    Ok(Json(ChatResponse {
        session_id: reply.session_id,
        reply: reply.reply,
    }))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
