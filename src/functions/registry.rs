use jsonschema::{Draft, JSONSchema};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::error::{CalChatError, Result};
use crate::models::Attendee;

pub const LIST_AVAILABLE_SLOTS: &str = "list_available_slots";
pub const BOOK_MEETING: &str = "book_meeting";

/// A model-requested function call, parsed and schema-validated into its
/// typed argument struct. The set of supported functions is closed.
#[derive(Debug, Clone)]
pub enum FunctionCall {
    ListAvailableSlots(ListSlotsArgs),
    BookMeeting(BookMeetingArgs),
}

#[derive(Deserialize, Debug, Clone)]
pub struct ListSlotsArgs {
    pub date: String,
    pub event_type_id: Option<i64>,
    pub duration: Option<i64>,
    pub timezone: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BookMeetingArgs {
    pub event_type_id: Option<i64>,
    pub start_time: String,
    pub end_time: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub attendees: Vec<Attendee>,
}

struct FunctionSpec {
    name: &'static str,
    description: &'static str,
    parameters: Value,
}

/// Static registry of the functions exposed to the model.
pub struct FunctionRegistry {
    specs: Vec<FunctionSpec>,
    schemas: HashMap<&'static str, Value>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        let specs = vec![
            FunctionSpec {
                name: LIST_AVAILABLE_SLOTS,
                description: "Get available time slots for booking a meeting on a given date",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "date": {
                            "type": "string",
                            "description": "The date to check for available slots (YYYY-MM-DD)"
                        },
                        "event_type_id": {
                            "type": "integer",
                            "description": "The event type ID (optional, selected by duration if not provided)"
                        },
                        "duration": {
                            "type": "integer",
                            "description": "The desired meeting duration in minutes (optional, default is 30)"
                        },
                        "timezone": {
                            "type": "string",
                            "description": "The timezone for the slots (optional)"
                        }
                    },
                    "required": ["date"],
                    "additionalProperties": false
                }),
            },
            FunctionSpec {
                name: BOOK_MEETING,
                description: "Book a meeting in a previously confirmed available slot",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "event_type_id": {
                            "type": "integer",
                            "description": "The event type ID (optional, selected by duration if not provided)"
                        },
                        "start_time": {
                            "type": "string",
                            "description": "The start time of the meeting (ISO format with offset)"
                        },
                        "end_time": {
                            "type": "string",
                            "description": "The end time of the meeting (ISO format with offset)"
                        },
                        "title": {
                            "type": "string",
                            "description": "The title of the meeting (optional)"
                        },
                        "description": {
                            "type": "string",
                            "description": "The description of the meeting (optional)"
                        },
                        "attendees": {
                            "type": "array",
                            "minItems": 1,
                            "items": {
                                "type": "object",
                                "properties": {
                                    "email": {"type": "string"},
                                    "name": {"type": "string"},
                                    "timezone": {"type": "string"}
                                },
                                "required": ["email", "name"],
                                "additionalProperties": false
                            },
                            "description": "The meeting attendees"
                        }
                    },
                    "required": ["start_time", "end_time", "attendees"],
                    "additionalProperties": false
                }),
            },
        ];

        let schemas = specs
            .iter()
            .map(|spec| (spec.name, spec.parameters.clone()))
            .collect();

        Self { specs, schemas }
    }

    /// Function declarations in the chat-completions `tools` wire format.
    pub fn specs_for_llm(&self) -> Vec<Value> {
        self.specs
            .iter()
            .map(|spec| {
                json!({
                    "type": "function",
                    "function": {
                        "name": spec.name,
                        "description": spec.description,
                        "parameters": spec.parameters,
                    }
                })
            })
            .collect()
    }

    /// Validate and parse a model-supplied call into a typed `FunctionCall`.
    pub fn parse(&self, name: &str, arguments_json: &str) -> Result<FunctionCall> {
        let schema_value = self
            .schemas
            .get(name)
            .ok_or_else(|| CalChatError::UnknownFunction(name.to_string()))?;

        let arguments: Value = serde_json::from_str(arguments_json).map_err(|e| {
            CalChatError::InvalidArguments(format!("arguments are not valid JSON: {}", e))
        })?;

        self.validate(schema_value, &arguments)?;

        match name {
            LIST_AVAILABLE_SLOTS => serde_json::from_value(arguments)
                .map(FunctionCall::ListAvailableSlots)
                .map_err(|e| CalChatError::InvalidArguments(e.to_string())),
            BOOK_MEETING => serde_json::from_value(arguments)
                .map(FunctionCall::BookMeeting)
                .map_err(|e| CalChatError::InvalidArguments(e.to_string())),
            _ => Err(CalChatError::UnknownFunction(name.to_string())),
        }
    }

    fn validate(&self, schema_value: &Value, arguments: &Value) -> Result<()> {
        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema_value)
            .map_err(|e| CalChatError::InvalidArguments(format!("Invalid function schema: {}", e)))?;

        if let Err(errors) = schema.validate(arguments) {
            let error_messages: Vec<String> = errors
                .map(|e| format!("{}: {}", e.instance_path, e))
                .collect();
            return Err(CalChatError::InvalidArguments(error_messages.join("; ")));
        }

        Ok(())
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
