use serde_json::Value;

use crate::api::ChatOutcome;
use crate::error::{CalChatError, Result};
use crate::models::ToolCall;

fn model_error(message: impl Into<String>) -> CalChatError {
    CalChatError::Model {
        status: None,
        message: message.into(),
    }
}

/// Parse a chat-completions response into either a text reply or a set of
/// requested function calls.
pub fn parse_outcome(response_json: &Value) -> Result<ChatOutcome> {
    let choices = response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| model_error("No choices in response"))?;

    let first_choice = choices
        .first()
        .ok_or_else(|| model_error("Empty choices array"))?;

    let message = first_choice
        .get("message")
        .ok_or_else(|| model_error("No message in response"))?;

    let content = message
        .get("content")
        .and_then(|c| c.as_str())
        .map(|s| s.to_string());

    if let Some(tool_calls) = message.get("tool_calls").and_then(|tc| tc.as_array()) {
        if !tool_calls.is_empty() {
            let calls: Vec<ToolCall> = tool_calls
                .iter()
                .map(|tc| {
                    serde_json::from_value(tc.clone())
                        .map_err(|e| model_error(format!("Malformed tool call: {}", e)))
                })
                .collect::<Result<_>>()?;
            return Ok(ChatOutcome::ToolCalls { content, calls });
        }
    }

    match content {
        Some(text) => Ok(ChatOutcome::Reply(text)),
        None => Err(model_error("No tool calls and no content in response")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_text_reply() {
        let response = json!({
            "choices": [{"message": {"content": "Hello there"}}]
        });
        match parse_outcome(&response).unwrap() {
            ChatOutcome::Reply(text) => assert_eq!(text, "Hello there"),
            other => panic!("expected reply, got {:?}", other),
        }
    }

    #[test]
    fn tool_call_request() {
        let response = json!({
            "choices": [{"message": {
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {
                        "name": "list_available_slots",
                        "arguments": "{\"date\":\"2026-03-12\"}"
                    }
                }]
            }}]
        });
        match parse_outcome(&response).unwrap() {
            ChatOutcome::ToolCalls { calls, .. } => {
                assert_eq!(calls.len(), 1);
                assert_eq!(calls[0].function.name, "list_available_slots");
            }
            other => panic!("expected tool calls, got {:?}", other),
        }
    }

    #[test]
    fn empty_tool_calls_falls_back_to_content() {
        let response = json!({
            "choices": [{"message": {"content": "done", "tool_calls": []}}]
        });
        assert!(matches!(
            parse_outcome(&response).unwrap(),
            ChatOutcome::Reply(_)
        ));
    }

    #[test]
    fn missing_choices_is_model_error() {
        let response = json!({"unexpected": true});
        assert!(matches!(
            parse_outcome(&response),
            Err(CalChatError::Model { .. })
        ));
    }
}
