mod client;

pub use client::CalComClient;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Booking, BookingRequest, EventType, Slot};

/// Seam for the scheduling provider, so handlers can be driven by a fake
/// calendar in tests.
pub trait CalendarApi: Send + Sync {
    fn list_event_types(&self) -> impl std::future::Future<Output = Result<Vec<EventType>>> + Send;

    fn list_slots(
        &self,
        event_type_id: i64,
        date: NaiveDate,
        timezone: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Slot>>> + Send;

    fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> impl std::future::Future<Output = Result<Booking>> + Send;
}

/// Pick the event type for a requested duration: first exact length match,
/// else closest by absolute difference.
pub fn select_event_type(event_types: &[EventType], duration: i64) -> Option<&EventType> {
    if let Some(exact) = event_types.iter().find(|et| et.length == duration) {
        return Some(exact);
    }
    event_types
        .iter()
        .min_by_key(|et| (et.length - duration).abs())
}
