use chrono::{DateTime, NaiveDate};
use serde_json::{json, Value};

use crate::calcom::{select_event_type, CalendarApi};
use crate::error::{CalChatError, Result};
use crate::functions::registry::{BookMeetingArgs, FunctionCall, ListSlotsArgs};
use crate::models::BookingRequest;

pub const DEFAULT_DURATION_MINUTES: i64 = 30;

/// Execute a parsed function call against the scheduling provider and return
/// a JSON value suitable for a function-result turn.
pub async fn dispatch<C: CalendarApi>(
    call: FunctionCall,
    calendar: &C,
    default_timezone: &str,
) -> Result<Value> {
    match call {
        FunctionCall::ListAvailableSlots(args) => {
            list_available_slots(args, calendar, default_timezone).await
        }
        FunctionCall::BookMeeting(args) => book_meeting(args, calendar).await,
    }
}

async fn list_available_slots<C: CalendarApi>(
    args: ListSlotsArgs,
    calendar: &C,
    default_timezone: &str,
) -> Result<Value> {
    let date = NaiveDate::parse_from_str(&args.date, "%Y-%m-%d").map_err(|_| {
        CalChatError::InvalidArguments(format!(
            "Invalid date format: {}. Expected format: YYYY-MM-DD",
            args.date
        ))
    })?;
    let timezone = args.timezone.as_deref().unwrap_or(default_timezone);

    let event_types = calendar.list_event_types().await?;
    let event_type = match args.event_type_id {
        Some(id) => event_types.iter().find(|et| et.id == id),
        None => {
            let duration = args.duration.unwrap_or(DEFAULT_DURATION_MINUTES);
            let selected = select_event_type(&event_types, duration).ok_or_else(|| {
                CalChatError::Validation("No event types available".to_string())
            })?;
            tracing::info!(
                event_type_id = selected.id,
                length = selected.length,
                "selected event type by duration"
            );
            Some(selected)
        }
    };

    let event_type_id = args
        .event_type_id
        .or(event_type.map(|et| et.id))
        .unwrap_or_default();
    let event_type_name = event_type
        .map(|et| et.title.clone())
        .unwrap_or_else(|| format!("Event Type {}", event_type_id));

    let slots = calendar.list_slots(event_type_id, date, timezone).await?;

    let slots_json: Vec<Value> = slots
        .iter()
        .map(|slot| {
            json!({
                "start": slot.start.to_rfc3339(),
                "end": slot.end.to_rfc3339(),
                "date": slot.start.date_naive().to_string(),
            })
        })
        .collect();

    let mut result = json!({
        "slots": slots_json,
        "event_type_id": event_type_id,
        "event_type_name": event_type_name,
    });
    if slots.is_empty() {
        result["message"] = json!(format!(
            "No available slots found for {} on {}.",
            event_type_name, args.date
        ));
    }

    Ok(result)
}

async fn book_meeting<C: CalendarApi>(args: BookMeetingArgs, calendar: &C) -> Result<Value> {
    let start_time = parse_time(&args.start_time, "start_time")?;
    let end_time = parse_time(&args.end_time, "end_time")?;

    let event_type_id = match args.event_type_id {
        Some(id) => id,
        None => {
            let duration = (end_time - start_time).num_minutes().max(1);
            let event_types = calendar.list_event_types().await?;
            let selected = select_event_type(&event_types, duration).ok_or_else(|| {
                CalChatError::Validation("No event types available".to_string())
            })?;
            tracing::info!(
                event_type_id = selected.id,
                length = selected.length,
                "selected event type by duration"
            );
            selected.id
        }
    };

    let request = BookingRequest {
        event_type_id,
        start_time,
        end_time,
        title: args.title,
        description: args.description,
        attendees: args.attendees,
    };

    let booking = calendar.create_booking(&request).await?;

    Ok(json!({
        "booking_id": booking.uid,
        "title": booking.title,
        "start_time": booking.start_time.to_rfc3339(),
        "end_time": booking.end_time.to_rfc3339(),
        "status": booking.status,
        "attendees": request.attendees,
    }))
}

fn parse_time(value: &str, field: &str) -> Result<DateTime<chrono::FixedOffset>> {
    DateTime::parse_from_rfc3339(value).map_err(|e| {
        CalChatError::InvalidArguments(format!("Invalid {}: {} ({})", field, value, e))
    })
}
