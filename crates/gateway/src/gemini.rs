//! Gemini `generateContent` backend.

use crate::{AnalysisService, GatewayError, GeminiConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use trulogo_model::{AnalysisResult, RiskLevel};
use trulogo_payload::ImagePayload;
use trulogo_prompt::{
    analysis_response_schema, AdvicePrompt, AnalysisPrompt, GenerationPrompt, Prompt,
    LOGO_ASPECT_RATIO, LOGO_IMAGE_SIZE,
};

/// Mime type the analysis request declares for the uploaded logo.
const ANALYSIS_IMAGE_MIME: &str = "image/jpeg";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn new(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content { parts }],
            generation_config: None,
        }
    }

    fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: String) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }

    fn image(mime_type: &str, data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
    image_size: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Concatenated text parts of the first candidate, if any.
    fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Inline images of the first candidate, in reply order.
    fn images(&self) -> Vec<ImagePayload> {
        self.first_parts()
            .iter()
            .filter_map(|p| p.inline_data.as_ref())
            .filter(|d| !d.data.is_empty())
            .map(|d| ImagePayload::new(d.mime_type.clone(), d.data.clone()))
            .collect()
    }
}

/// Map a non-success HTTP reply to an error.
fn classify_status(status: u16, body: String) -> GatewayError {
    if status == 401 || status == 403 || body.contains("API_KEY_INVALID") {
        GatewayError::Auth(format!("HTTP {}: {}", status, body))
    } else {
        GatewayError::Service { status, body }
    }
}

/// Map a failure while reading a success reply to an error.
///
/// A body cut short or timed out is a transport failure; anything else is a
/// reply that did not decode.
fn classify_body_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() || e.is_body() {
        GatewayError::Network(e.to_string())
    } else {
        GatewayError::Schema(e.to_string())
    }
}

/// Gemini REST backend.
pub struct GeminiBackend {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiBackend {
    /// Create a new Gemini backend.
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let api_key = self.config.api_key().ok_or(GatewayError::MissingApiKey)?;

        tracing::debug!(model = %model, "Sending Gemini generateContent request");

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), body));
        }

        response.json().await.map_err(classify_body_error)
    }
}

impl AnalysisService for GeminiBackend {
    async fn analyze_logo_risk(
        &self,
        image_base64: &str,
        brand_name: &str,
        context: &str,
    ) -> Result<AnalysisResult, GatewayError> {
        let prompt = AnalysisPrompt {
            brand_name,
            context,
        }
        .render();

        let request = GenerateContentRequest::new(vec![
            Part::image(ANALYSIS_IMAGE_MIME, image_base64),
            Part::text(prompt),
        ])
        .with_config(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(analysis_response_schema()),
            ..Default::default()
        });

        let response = self
            .generate_content(&self.config.analysis_model, &request)
            .await?;
        let text = response.text().ok_or(GatewayError::EmptyReply)?;

        serde_json::from_str(text.trim()).map_err(|e| GatewayError::Schema(e.to_string()))
    }

    async fn generate_safe_logo(
        &self,
        description: &str,
        style: &str,
    ) -> Result<Vec<ImagePayload>, GatewayError> {
        let prompt = GenerationPrompt { description, style }.render();

        let request = GenerateContentRequest::new(vec![Part::text(prompt)]).with_config(
            GenerationConfig {
                response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
                image_config: Some(ImageConfig {
                    aspect_ratio: LOGO_ASPECT_RATIO.to_string(),
                    image_size: LOGO_IMAGE_SIZE.to_string(),
                }),
                ..Default::default()
            },
        );

        let response = self
            .generate_content(&self.config.image_model, &request)
            .await?;

        Ok(response.images())
    }

    async fn legal_advice(
        &self,
        risk_level: RiskLevel,
        context: &str,
    ) -> Result<String, GatewayError> {
        let prompt = AdvicePrompt {
            risk_level,
            context,
        }
        .render();

        let request = GenerateContentRequest::new(vec![Part::text(prompt)]);
        let response = self
            .generate_content(&self.config.advice_model, &request)
            .await?;

        response.text().ok_or(GatewayError::EmptyReply)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
