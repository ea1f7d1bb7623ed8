use crate::GatewayError;
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";
pub const DEFAULT_ADVICE_MODEL: &str = "gemini-2.5-flash";

/// Gemini backend configuration.
///
/// Created once at startup and handed to the backend; never mutated by
/// request handling.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key; `None` makes every call fail with `MissingApiKey`
    pub api_key: Option<String>,
    /// Base URL for the Gemini REST API
    pub base_url: String,
    /// Model used for risk analysis
    pub analysis_model: String,
    /// Model used for logo generation
    pub image_model: String,
    /// Model used for legal advice
    pub advice_model: String,
    /// Request timeout in seconds; `None` keeps the transport default
    pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            advice_model: DEFAULT_ADVICE_MODEL.to_string(),
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("analysis_model", &self.analysis_model)
            .field("image_model", &self.image_model)
            .field("advice_model", &self.advice_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GeminiConfig {
    /// Config with the given key and default endpoints.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// The API key, if one is set and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Load configuration from environment variables.
    ///
    /// Loads `.env` if present. A missing API key is not an error.
    pub fn from_env() -> Result<Self, GatewayError> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var_or = |key: &str, default: String| lookup(key).unwrap_or(default);

        let timeout_secs = match lookup("TRULOGO_TIMEOUT_SECS") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                GatewayError::Config(format!("invalid TRULOGO_TIMEOUT_SECS: {e}"))
            })?),
            None => None,
        };

        Ok(Self {
            api_key: lookup("GEMINI_API_KEY")
                .filter(|k| !k.trim().is_empty())
                .or_else(|| lookup("API_KEY")),
            base_url: var_or("TRULOGO_GEMINI_BASE_URL", defaults.base_url),
            analysis_model: var_or("TRULOGO_ANALYSIS_MODEL", defaults.analysis_model),
            image_model: var_or("TRULOGO_IMAGE_MODEL", defaults.image_model),
            advice_model: var_or("TRULOGO_ADVICE_MODEL", defaults.advice_model),
            timeout_secs,
        })
    }
}
