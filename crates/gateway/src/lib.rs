//! Analysis gateway for the external AI service.
//!
//! Provides the `AnalysisService` trait, its Gemini implementation, and the
//! `AnalysisGateway` wrapper that turns every failure into a renderable
//! fallback. Callers that need to know *why* a call failed use the service
//! directly; UI-facing callers use the gateway.

use std::future::Future;
use thiserror::Error;
use trulogo_model::{AnalysisResult, RiskLevel};
use trulogo_payload::ImagePayload;

mod config;
mod gateway;
mod gemini;

pub use config::GeminiConfig;
pub use gateway::{AnalysisGateway, ADVICE_UNAVAILABLE, NO_ADVICE_GENERATED};
pub use gemini::GeminiBackend;

/// Errors from AI service calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Service error: HTTP {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Malformed reply: {0}")]
    Schema(String),

    #[error("Empty reply from service")]
    EmptyReply,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Whether the failure is due to a missing or rejected credential.
    pub fn is_credential_error(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::Auth(_))
    }
}

/// Trait for AI analysis services (Gemini, test doubles, etc.)
///
/// Every operation reports failures as a typed `GatewayError`.
pub trait AnalysisService {
    /// Analyze a base64 logo image for trademark risk.
    fn analyze_logo_risk(
        &self,
        image_base64: &str,
        brand_name: &str,
        context: &str,
    ) -> impl Future<Output = Result<AnalysisResult, GatewayError>> + Send;

    /// Generate trademark-safe logo images.
    ///
    /// `Ok(vec![])` means the service answered but produced no image.
    fn generate_safe_logo(
        &self,
        description: &str,
        style: &str,
    ) -> impl Future<Output = Result<Vec<ImagePayload>, GatewayError>> + Send;

    /// Generate Markdown legal advice for a risk level.
    fn legal_advice(
        &self,
        risk_level: RiskLevel,
        context: &str,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;

    /// Get the service name for logging.
    fn name(&self) -> &'static str;
}
