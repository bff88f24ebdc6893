mod calcom;
mod chat;

pub use calcom::{Attendee, Booking, BookingRequest, EventType, Slot};
pub use chat::{Message, Session, ToolCall, ToolFunction};
