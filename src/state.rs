use std::sync::Arc;
use std::time::Duration;

use crate::api::{ModelClient, OpenAiClient};
use crate::calcom::{CalComClient, CalendarApi};
use crate::config::Config;
use crate::orchestrator::ChatOrchestrator;
use crate::session::{MemorySessionStore, SessionStore};

/// Shared application state used by all HTTP handlers, generic over the
/// model, calendar and session seams so the router can be driven by fakes.
pub struct AppState<M, C, S> {
    pub orchestrator: Arc<ChatOrchestrator<M, C, S>>,
    pub calendar: Arc<C>,
    default_timezone: String,
}

impl<M, C, S> Clone for AppState<M, C, S> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: self.orchestrator.clone(),
            calendar: self.calendar.clone(),
            default_timezone: self.default_timezone.clone(),
        }
    }
}

impl<M, C, S> AppState<M, C, S>
where
    M: ModelClient,
    C: CalendarApi,
    S: SessionStore,
{
    pub fn new(model: M, calendar: Arc<C>, sessions: S, default_timezone: String) -> Self {
        let orchestrator = Arc::new(ChatOrchestrator::new(
            model,
            calendar.clone(),
            sessions,
            default_timezone.clone(),
        ));
        Self {
            orchestrator,
            calendar,
            default_timezone,
        }
    }

    pub fn default_timezone(&self) -> &str {
        &self.default_timezone
    }
}

/// State pinned to the real model and provider clients.
pub type App = AppState<OpenAiClient, CalComClient, MemorySessionStore>;

impl App {
    pub fn init(config: &Config) -> anyhow::Result<Self> {
        let model = OpenAiClient::new(
            &config.openai_api_key,
            &config.openai_endpoint,
            &config.model,
        )?;

        let calendar = Arc::new(CalComClient::new(
            &config.calcom_api_key,
            &config.calcom_api_base,
            &config.default_timezone,
        ));

        let sessions = MemorySessionStore::new(
            Duration::from_secs(config.session_ttl_minutes.max(1) as u64 * 60),
            config.session_capacity,
        );

        Ok(Self::new(
            model,
            calendar,
            sessions,
            config.default_timezone.clone(),
        ))
    }
}
