mod client;
mod response;

pub use client::OpenAiClient;
pub use response::parse_outcome;

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::models::{Message, ToolCall};

#[derive(Serialize)]
pub struct RequestBody {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
}

/// What the model came back with: either a final text reply or a request to
/// invoke one or more functions.
#[derive(Debug, Clone)]
pub enum ChatOutcome {
    Reply(String),
    ToolCalls {
        content: Option<String>,
        calls: Vec<ToolCall>,
    },
}

/// Seam for the language-model provider, so the orchestrator can be driven by
/// a scripted fake in tests.
pub trait ModelClient: Send + Sync {
    fn chat(
        &self,
        messages: &[Message],
        tools: Option<&[Value]>,
    ) -> impl std::future::Future<Output = Result<ChatOutcome>> + Send;
}
