#![allow(dead_code)]

use std::sync::Mutex;

use calchat::api::{ChatOutcome, ModelClient};
use calchat::calcom::CalendarApi;
use calchat::error::{CalChatError, Result};
use calchat::models::{
    Attendee, Booking, BookingRequest, EventType, Message, Slot, ToolCall, ToolFunction,
};
use chrono::{DateTime, Duration, NaiveDate};
use serde_json::Value;

/// Scripted model: returns its outcomes in order, recording each transcript
/// it was called with.
pub struct ScriptedModel {
    outcomes: Mutex<Vec<ChatOutcome>>,
    pub transcripts: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedModel {
    pub fn new(mut outcomes: Vec<ChatOutcome>) -> Self {
        outcomes.reverse();
        Self {
            outcomes: Mutex::new(outcomes),
            transcripts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.transcripts.lock().unwrap().len()
    }
}

impl ModelClient for ScriptedModel {
    async fn chat(&self, messages: &[Message], _tools: Option<&[Value]>) -> Result<ChatOutcome> {
        self.transcripts.lock().unwrap().push(messages.to_vec());
        self.outcomes
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| CalChatError::Model {
                status: None,
                message: "scripted model ran out of outcomes".to_string(),
            })
    }
}

/// Model that fails every call, for terminal-failure tests.
pub struct FailingModel;

impl ModelClient for FailingModel {
    async fn chat(&self, _messages: &[Message], _tools: Option<&[Value]>) -> Result<ChatOutcome> {
        Err(CalChatError::Model {
            status: Some(401),
            message: "invalid api key".to_string(),
        })
    }
}

/// Canned calendar with fixed event types and slots; bookings are recorded,
/// or rejected wholesale when `reject_bookings` is set. `fail_slots` makes
/// every availability lookup fail like a provider outage.
pub struct FakeCalendar {
    pub event_types: Vec<EventType>,
    pub slots: Vec<Slot>,
    pub bookings: Mutex<Vec<BookingRequest>>,
    pub reject_bookings: bool,
    pub fail_slots: bool,
}

impl FakeCalendar {
    pub fn with_slots(slots: Vec<Slot>) -> Self {
        Self {
            event_types: vec![
                event_type(101, 15),
                event_type(102, 30),
                event_type(103, 60),
            ],
            slots,
            bookings: Mutex::new(Vec::new()),
            reject_bookings: false,
            fail_slots: false,
        }
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.lock().unwrap().len()
    }
}

impl CalendarApi for FakeCalendar {
    async fn list_event_types(&self) -> Result<Vec<EventType>> {
        Ok(self.event_types.clone())
    }

    async fn list_slots(
        &self,
        _event_type_id: i64,
        _date: NaiveDate,
        _timezone: &str,
    ) -> Result<Vec<Slot>> {
        if self.fail_slots {
            return Err(CalChatError::Provider {
                status: Some(500),
                message: "upstream unavailable".to_string(),
            });
        }
        Ok(self.slots.clone())
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking> {
        if self.reject_bookings {
            return Err(CalChatError::Provider {
                status: Some(400),
                message: "no_available_users_found_error".to_string(),
            });
        }
        self.bookings.lock().unwrap().push(request.clone());
        let attendee = request.attendees.first().cloned().unwrap_or(Attendee {
            email: "unknown@example.com".to_string(),
            name: "Unknown".to_string(),
            timezone: None,
        });
        Ok(Booking {
            id: 1,
            uid: "bk_123".to_string(),
            title: request
                .title
                .clone()
                .unwrap_or_else(|| format!("Meeting with {}", attendee.name)),
            start_time: request.start_time,
            end_time: request.end_time,
            status: "ACCEPTED".to_string(),
            attendees: request.attendees.clone(),
        })
    }
}

pub fn event_type(id: i64, length: i64) -> EventType {
    EventType {
        id,
        slug: format!("meeting-{}", length),
        title: format!("{} Min Meeting", length),
        description: None,
        length,
        hidden: false,
    }
}

pub fn slot(start: &str, minutes: i64) -> Slot {
    let start = DateTime::parse_from_rfc3339(start).unwrap();
    Slot {
        start,
        end: start + Duration::minutes(minutes),
    }
}

pub fn tool_call(id: &str, name: &str, arguments: &str) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        call_type: "function".to_string(),
        function: ToolFunction {
            name: name.to_string(),
            arguments: arguments.to_string(),
        },
    }
}
