use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A provider-defined meeting template. `length` is the duration in minutes.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EventType {
    pub id: i64,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub length: i64,
    #[serde(default)]
    pub hidden: bool,
}

/// An available booking window for a given event type and date.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Attendee {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Everything needed to create a booking with the provider.
#[derive(Clone, Debug)]
pub struct BookingRequest {
    pub event_type_id: i64,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub attendees: Vec<Attendee>,
}

/// A confirmed booking as reported by the provider.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Booking {
    #[serde(default)]
    pub id: i64,
    pub uid: String,
    pub title: String,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<FixedOffset>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<FixedOffset>,
    pub status: String,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
}
