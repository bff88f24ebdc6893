mod handlers;
mod registry;

pub use handlers::{dispatch, DEFAULT_DURATION_MINUTES};
pub use registry::{BookMeetingArgs, FunctionCall, FunctionRegistry, ListSlotsArgs};
