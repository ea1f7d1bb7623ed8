//! UI-facing gateway: every operation returns something renderable.

use crate::{AnalysisService, GatewayError, GeminiBackend, GeminiConfig};
use trulogo_model::{AnalysisResult, RiskLevel};
use trulogo_payload::strip_data_url_prefix;

/// Advice text returned when the advice call fails.
pub const ADVICE_UNAVAILABLE: &str = "Unable to generate legal advice at this time.";

/// Advice text returned when the service answers with no text.
pub const NO_ADVICE_GENERATED: &str = "No advice generated.";

/// Degrade-to-stub wrapper around an `AnalysisService`.
///
/// Errors never cross this boundary: they are logged and replaced by the
/// operation's fallback value.
pub struct AnalysisGateway<S> {
    service: S,
}

impl AnalysisGateway<GeminiBackend> {
    /// Gateway backed by Gemini.
    pub fn gemini(config: GeminiConfig) -> Result<Self, GatewayError> {
        Ok(Self::new(GeminiBackend::new(config)?))
    }
}

impl<S: AnalysisService> AnalysisGateway<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// The wrapped service, for callers that want typed errors.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Analyze a logo, or return `AnalysisResult::fallback()` on any failure.
    ///
    /// Accepts the image with or without a data-URL header. Replies are passed
    /// through unchanged, even when their scores look inconsistent.
    pub async fn analyze_logo_risk(
        &self,
        image_base64: &str,
        brand_name: &str,
        context: &str,
    ) -> AnalysisResult {
        let image = strip_data_url_prefix(image_base64);

        match self
            .service
            .analyze_logo_risk(image, brand_name, context)
            .await
        {
            Ok(result) => {
                if !result.score_in_range() {
                    tracing::warn!(
                        backend = self.service.name(),
                        risk_score = result.risk_score,
                        "Analysis reply has scores outside 0-100"
                    );
                } else if !result.level_matches_score() {
                    tracing::warn!(
                        backend = self.service.name(),
                        risk_score = result.risk_score,
                        risk_level = %result.risk_level,
                        "Analysis reply level disagrees with score band"
                    );
                }
                tracing::info!(
                    backend = self.service.name(),
                    brand = %brand_name,
                    risk_level = %result.risk_level,
                    matches = result.similar_trademarks.len(),
                    "Logo risk analysis complete"
                );
                result
            }
            Err(e) => {
                tracing::error!(
                    backend = self.service.name(),
                    error = %e,
                    "Logo risk analysis failed; returning fallback"
                );
                AnalysisResult::fallback()
            }
        }
    }

    /// Generate logos as data URLs, or an empty list on any failure.
    pub async fn generate_safe_logo(&self, description: &str, style: &str) -> Vec<String> {
        match self.service.generate_safe_logo(description, style).await {
            Ok(images) => {
                tracing::info!(
                    backend = self.service.name(),
                    count = images.len(),
                    "Logo generation complete"
                );
                images.iter().map(|i| i.to_data_url()).collect()
            }
            Err(e) => {
                tracing::error!(
                    backend = self.service.name(),
                    error = %e,
                    "Logo generation failed; returning no images"
                );
                Vec::new()
            }
        }
    }

    /// Get Markdown advice, or a fixed apology on any failure.
    pub async fn get_legal_advice(&self, risk_level: RiskLevel, context: &str) -> String {
        match self.service.legal_advice(risk_level, context).await {
            Ok(text) => text,
            Err(GatewayError::EmptyReply) => NO_ADVICE_GENERATED.to_string(),
            Err(e) => {
                tracing::error!(
                    backend = self.service.name(),
                    error = %e,
                    "Legal advice generation failed"
                );
                ADVICE_UNAVAILABLE.to_string()
            }
        }
    }
}
