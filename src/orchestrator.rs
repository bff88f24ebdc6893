use std::sync::Arc;

use chrono::Local;

use crate::api::{ChatOutcome, ModelClient};
use crate::calcom::CalendarApi;
use crate::error::{CalChatError, Result};
use crate::functions::{dispatch, FunctionRegistry};
use crate::models::{Message, ToolCall};
use crate::session::SessionStore;

/// Hard cap on model → function → model rounds for one inbound message.
pub const MAX_FUNCTION_ROUNDS: usize = 5;

pub struct ChatReply {
    pub session_id: String,
    pub reply: String,
}

/// Drives one chat exchange: append the user turn, call the model with the
/// transcript plus function schemas, dispatch any requested function calls,
/// and loop until the model produces a text reply or the round cap is hit.
pub struct ChatOrchestrator<M, C, S> {
    model: M,
    calendar: Arc<C>,
    sessions: S,
    registry: FunctionRegistry,
    default_timezone: String,
}

impl<M, C, S> ChatOrchestrator<M, C, S>
where
    M: ModelClient,
    C: CalendarApi,
    S: SessionStore,
{
    pub fn new(model: M, calendar: Arc<C>, sessions: S, default_timezone: String) -> Self {
        Self {
            model,
            calendar,
            sessions,
            registry: FunctionRegistry::new(),
            default_timezone,
        }
    }

    pub async fn process_message(
        &self,
        message: &str,
        session_id: Option<String>,
    ) -> Result<ChatReply> {
        let (session_id, handle) = self
            .sessions
            .get_or_create(session_id, &system_prompt());

        // Holding the lock across the whole exchange serializes concurrent
        // requests on the same session, so transcript appends never interleave.
        let mut session = handle.lock().await;
        session.append(Message::user(message));

        let tools = self.registry.specs_for_llm();

        for round in 0..MAX_FUNCTION_ROUNDS {
            let outcome = self.model.chat(&session.turns, Some(&tools)).await?;

            match outcome {
                ChatOutcome::Reply(text) => {
                    session.append(Message::assistant(text.clone()));
                    return Ok(ChatReply {
                        session_id,
                        reply: text,
                    });
                }
                ChatOutcome::ToolCalls { content, calls } => {
                    tracing::debug!(round, count = calls.len(), "model requested function calls");
                    session.append(Message::assistant_tool_calls(content, calls.clone()));

                    for call in &calls {
                        let result = self.run_function(call).await;
                        session.append(Message::tool_result(&call.id, result));
                    }
                }
            }
        }

        tracing::warn!(session_id = %session_id, "function-call round limit exceeded");
        Err(CalChatError::RoundLimitExceeded(MAX_FUNCTION_ROUNDS))
    }

    /// Run one function call. Failures come back as an error-describing
    /// result string so the model can react (e.g. pick a different slot)
    /// instead of the request dying.
    async fn run_function(&self, call: &ToolCall) -> String {
        let name = &call.function.name;
        tracing::info!(function = %name, "dispatching function call");

        let parsed = match self.registry.parse(name, &call.function.arguments) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(function = %name, error = %e, "function call rejected");
                return format!("Error: {}", e);
            }
        };

        match dispatch(parsed, self.calendar.as_ref(), &self.default_timezone).await {
            Ok(value) => value.to_string(),
            Err(e) => {
                tracing::warn!(function = %name, error = %e, "function call failed");
                format!("Error: {}", e)
            }
        }
    }
}

fn system_prompt() -> String {
    let current_date = Local::now().format("%A, %B %d, %Y");
    format!(
        "Cal.com Scheduling Assistant - Today is {current_date}\n\
         \n\
         Your primary function is to help users book meetings on a Cal.com calendar.\n\
         \n\
         Booking workflow:\n\
         - Check availability with list_available_slots when a user requests a meeting\n\
         - If the requested slot is available, immediately book it with book_meeting\n\
         - Don't request information the user has already provided (date, time, name, email, reason)\n\
         - Complete the booking in a single step when possible\n\
         \n\
         If a function call returns an error, explain the problem and suggest an alternative\n\
         (for example a different slot) instead of retrying the same call.\n\
         \n\
         Always prioritize efficiency and minimize back-and-forth with users."
    )
}
