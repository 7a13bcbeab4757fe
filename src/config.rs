use anyhow::Context;

pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
const DEFAULT_PORT: u16 = 8080;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub gateway_url: String,
    /// `None` keeps the server up; AI endpoints then fail per request.
    pub api_key: Option<String>,
    pub model: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            gateway_url: non_empty("AI_GATEWAY_URL")
                .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            api_key: non_empty("AI_GATEWAY_API_KEY").or_else(|| non_empty("LOVABLE_API_KEY")),
            model: non_empty("AI_GATEWAY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port,
        })
    }
}
