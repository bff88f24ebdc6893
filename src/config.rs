use std::env;

/// Runtime configuration, loaded from the environment.
///
/// API keys are required; everything else has a sensible default.
#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_endpoint: String,
    pub model: String,
    pub calcom_api_key: String,
    pub calcom_api_base: String,
    pub default_timezone: String,
    pub session_ttl_minutes: i64,
    pub session_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| "OPENAI_API_KEY environment variable not set".to_string())?;

        let calcom_api_key = env::var("CALCOM_API_KEY")
            .map_err(|_| "CALCOM_API_KEY environment variable not set".to_string())?;

        // Endpoint may be given as a bare base URL; normalize to the
        // chat-completions path.
        let openai_endpoint = env::var("AI_API_ENDPOINT")
            .ok()
            .map(|endpoint| {
                if endpoint.ends_with("/chat/completions") {
                    endpoint
                } else if endpoint.ends_with("/v1") {
                    format!("{}/chat/completions", endpoint)
                } else if endpoint.ends_with("/v1/") {
                    format!("{}chat/completions", endpoint)
                } else {
                    format!("{}/v1/chat/completions", endpoint.trim_end_matches('/'))
                }
            })
            .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string());

        let model = env::var("AI_MODEL").unwrap_or_else(|_| "gpt-4-turbo".to_string());

        let calcom_api_base = env::var("CALCOM_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| "https://api.cal.com/v1".to_string());

        let default_timezone =
            env::var("DEFAULT_TIMEZONE").unwrap_or_else(|_| "America/Los_Angeles".to_string());

        let session_ttl_minutes = env::var("SESSION_TTL_MINUTES")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(60);

        let session_capacity = env::var("SESSION_CAPACITY")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(1024);

        Ok(Config {
            openai_api_key,
            openai_endpoint,
            model,
            calcom_api_key,
            calcom_api_base,
            default_timezone,
            session_ttl_minutes,
            session_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalization() {
        // Exercise the closure logic through from_env with a scoped env var.
        std::env::set_var("OPENAI_API_KEY", "k");
        std::env::set_var("CALCOM_API_KEY", "k");

        std::env::set_var("AI_API_ENDPOINT", "https://openrouter.ai/api/v1");
        let config = Config::from_env().unwrap();
        assert_eq!(
            config.openai_endpoint,
            "https://openrouter.ai/api/v1/chat/completions"
        );

        std::env::set_var("AI_API_ENDPOINT", "https://example.com");
        let config = Config::from_env().unwrap();
        assert_eq!(
            config.openai_endpoint,
            "https://example.com/v1/chat/completions"
        );

        std::env::remove_var("AI_API_ENDPOINT");
    }
}
