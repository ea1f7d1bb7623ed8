//! Core domain model for TruLogo trademark risk analysis.
//!
//! This crate defines the shared vocabulary used throughout the system:
//! - `AnalysisResult`: The structured output of one logo risk analysis
//! - `TrademarkMatch`: A similar registered or pending mark
//! - `RiskLevel`: Low, Medium, High, Critical severity
//! - `AppView` / `SupportedLanguage`: UI routing and display language state

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Summary used by the fallback result when analysis could not run.
pub const FALLBACK_SUMMARY: &str = "Could not perform AI analysis. Please check API Key.";

/// Flag used by the fallback result when analysis could not run.
pub const FALLBACK_FLAG: &str = "Analysis Failed";

/// Recommendation used by the fallback result when analysis could not run.
pub const FALLBACK_RECOMMENDATION: &str = "Please retry.";

/// Overall trademark risk severity.
///
/// Ordered by severity, so `RiskLevel::Low < RiskLevel::Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// All levels in ascending severity.
    pub const ALL: [RiskLevel; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// The band a 0-100 risk score falls into.
    ///
    /// Scores above 90 are critical, above 75 high, above 35 medium.
    pub fn from_score(score: f64) -> Self {
        if score > 90.0 {
            Self::Critical
        } else if score > 75.0 {
            Self::High
        } else if score > 35.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Wire label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Low
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known risk level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown risk level: {0}")]
pub struct ParseRiskLevelError(pub String);

impl FromStr for RiskLevel {
    type Err = ParseRiskLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseRiskLevelError(s.to_string())),
        }
    }
}

/// Registration status of a similar mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    Registered,
    Pending,
    Objected,
    Abandoned,
    /// Any status label outside the four known ones
    #[serde(other)]
    Unknown,
}

impl Default for MatchStatus {
    fn default() -> Self {
        Self::Unknown
    }
}

/// A registered or pending mark found similar to the analyzed logo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrademarkMatch {
    /// Name of the similar mark
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Similarity to the analyzed logo (0-100)
    #[serde(default, deserialize_with = "null_as_default")]
    pub similarity_score: f64,

    /// Trademark class label, e.g. "Class 35"
    #[serde(default, deserialize_with = "null_as_default")]
    pub class_id: String,

    /// Registration status
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: MatchStatus,

    /// Owner/registrant name
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: String,
}

impl TrademarkMatch {
    /// Create a match with the given name and score; other fields empty.
    pub fn new(name: impl Into<String>, similarity_score: f64) -> Self {
        Self {
            name: name.into(),
            similarity_score,
            class_id: String::new(),
            status: MatchStatus::Unknown,
            owner: String::new(),
        }
    }
}

/// The full output of one risk-analysis call.
///
/// `risk_score` and `risk_level` are required on the wire; every other field
/// defaults to empty when the model leaves it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Overall risk score (0-100), as reported by the model
    pub risk_score: f64,

    /// Overall risk level, as reported by the model
    pub risk_level: RiskLevel,

    /// Short executive summary of findings
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,

    /// Specific issues found, in model order
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: Vec<String>,

    /// Key visual elements detected, in model order
    #[serde(default, deserialize_with = "null_as_default")]
    pub visual_features: Vec<String>,

    /// Similar marks, in model order
    #[serde(default, deserialize_with = "null_as_default")]
    pub similar_trademarks: Vec<TrademarkMatch>,

    /// One-sentence legal advice
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendation_summary: String,
}

impl AnalysisResult {
    /// The deterministic stand-in returned whenever analysis cannot complete.
    pub fn fallback() -> Self {
        Self {
            risk_score: 0.0,
            risk_level: RiskLevel::Low,
            summary: FALLBACK_SUMMARY.to_string(),
            flags: vec![FALLBACK_FLAG.to_string()],
            visual_features: Vec::new(),
            similar_trademarks: Vec::new(),
            recommendation_summary: FALLBACK_RECOMMENDATION.to_string(),
        }
    }

    /// Whether this value is the fallback rather than a real analysis.
    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }

    /// Whether every score field lies within 0-100.
    pub fn score_in_range(&self) -> bool {
        in_range(self.risk_score)
            && self
                .similar_trademarks
                .iter()
                .all(|m| in_range(m.similarity_score))
    }

    /// Whether `risk_level` agrees with the band of `risk_score`.
    pub fn level_matches_score(&self) -> bool {
        RiskLevel::from_score(self.risk_score) == self.risk_level
    }

    /// The most similar mark, if any.
    pub fn closest_match(&self) -> Option<&TrademarkMatch> {
        self.similar_trademarks
            .iter()
            .max_by(|a, b| a.similarity_score.total_cmp(&b.similarity_score))
    }
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn in_range(score: f64) -> bool {
    (0.0..=100.0).contains(&score)
}

/// Navigable screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppView {
    Home,
    Analysis,
    Generation,
    Dashboard,
    Legal,
    Literacy,
}

impl Default for AppView {
    fn default() -> Self {
        Self::Home
    }
}

/// Display languages offered in the language picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportedLanguage {
    English,
    #[serde(rename = "Bahasa Indonesia")]
    BahasaIndonesia,
    #[serde(rename = "Tiếng Việt")]
    Vietnamese,
    Thai,
    Malay,
}

impl SupportedLanguage {
    pub const ALL: [SupportedLanguage; 5] = [
        Self::English,
        Self::BahasaIndonesia,
        Self::Vietnamese,
        Self::Thai,
        Self::Malay,
    ];

    /// Display label shown in the picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::BahasaIndonesia => "Bahasa Indonesia",
            Self::Vietnamese => "Tiếng Việt",
            Self::Thai => "Thai",
            Self::Malay => "Malay",
        }
    }

    /// Two-letter language code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::BahasaIndonesia => "id",
            Self::Vietnamese => "vi",
            Self::Thai => "th",
            Self::Malay => "ms",
        }
    }

    /// Look up a language by its two-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl Default for SupportedLanguage {
    fn default() -> Self {
        Self::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ACME_REPLY: &str = r#"{"riskScore":82,"riskLevel":"High","summary":"Matches existing ASEAN mark","flags":["Visual similarity"],"visualFeatures":["shield shape"],"similarTrademarks":[{"name":"AcmeCo","similarityScore":91,"classId":"Class 35","status":"Registered","owner":"Acme Holdings"}],"recommendationSummary":"Consider redesign"}"#;

    #[test]
    fn test_parse_acme_reply() {
        let result: AnalysisResult = serde_json::from_str(ACME_REPLY).unwrap();
        assert_eq!(
            result,
            AnalysisResult {
                risk_score: 82.0,
                risk_level: RiskLevel::High,
                summary: "Matches existing ASEAN mark".to_string(),
                flags: vec!["Visual similarity".to_string()],
                visual_features: vec!["shield shape".to_string()],
                similar_trademarks: vec![TrademarkMatch {
                    name: "AcmeCo".to_string(),
                    similarity_score: 91.0,
                    class_id: "Class 35".to_string(),
                    status: MatchStatus::Registered,
                    owner: "Acme Holdings".to_string(),
                }],
                recommendation_summary: "Consider redesign".to_string(),
            }
        );
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let json = serde_json::to_value(AnalysisResult::fallback()).unwrap();
        assert_eq!(json["riskLevel"], "Low");
        assert_eq!(json["recommendationSummary"], "Please retry.");
        assert!(json.get("similarTrademarks").unwrap().as_array().unwrap().is_empty());
    }

    #[test]
    fn test_fallback_fields() {
        let fallback = AnalysisResult::fallback();
        assert_eq!(fallback.risk_score, 0.0);
        assert_eq!(fallback.risk_level, RiskLevel::Low);
        assert_eq!(
            fallback.summary,
            "Could not perform AI analysis. Please check API Key."
        );
        assert_eq!(fallback.flags, vec!["Analysis Failed".to_string()]);
        assert!(fallback.visual_features.is_empty());
        assert!(fallback.similar_trademarks.is_empty());
        assert_eq!(fallback.recommendation_summary, "Please retry.");
        assert!(fallback.is_fallback());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let err = serde_json::from_str::<AnalysisResult>(r#"{"summary":"no score"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_optional_fields_default() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"riskScore":10,"riskLevel":"Low"}"#).unwrap();
        assert!(result.flags.is_empty());
        assert!(result.summary.is_empty());
    }

    #[test]
    fn test_null_optional_fields_default() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"riskScore":20,"riskLevel":"Low","summary":null,"flags":null,"similarTrademarks":[{"name":"X","similarityScore":null,"classId":null,"status":null,"owner":null}]}"#,
        )
        .unwrap();
        assert_eq!(result.summary, "");
        assert!(result.flags.is_empty());
        assert_eq!(result.similar_trademarks[0].status, MatchStatus::Unknown);
        assert_eq!(result.similar_trademarks[0].similarity_score, 0.0);
    }

    #[test]
    fn test_null_required_field_fails() {
        let err = serde_json::from_str::<AnalysisResult>(r#"{"riskScore":null,"riskLevel":"Low"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_unknown_status_maps_to_unknown() {
        let m: TrademarkMatch =
            serde_json::from_str(r#"{"name":"X","similarityScore":5,"status":"Opposed"}"#).unwrap();
        assert_eq!(m.status, MatchStatus::Unknown);
    }

    #[test]
    fn test_risk_level_bands() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(35.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(36.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(82.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(95.0), RiskLevel::Critical);
        assert!(RiskLevel::Low < RiskLevel::Critical);
    }

    #[test]
    fn test_risk_level_from_str() {
        assert_eq!("high".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!("Critical".parse::<RiskLevel>().unwrap(), RiskLevel::Critical);
        assert!("severe".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_out_of_range_scores_detected() {
        let mut result: AnalysisResult = serde_json::from_str(ACME_REPLY).unwrap();
        assert!(result.score_in_range());
        assert!(result.level_matches_score());

        result.risk_score = 140.0;
        assert!(!result.score_in_range());
        assert!(!result.level_matches_score());
    }

    #[test]
    fn test_closest_match() {
        let mut result = AnalysisResult::fallback();
        result.similar_trademarks = vec![
            TrademarkMatch::new("Alpha", 40.0),
            TrademarkMatch::new("Beta", 88.5),
        ];
        assert_eq!(result.closest_match().unwrap().name, "Beta");
    }

    #[test]
    fn test_app_view_and_language_labels() {
        assert_eq!(serde_json::to_string(&AppView::Literacy).unwrap(), "\"literacy\"");
        assert_eq!(
            serde_json::to_string(&SupportedLanguage::Vietnamese).unwrap(),
            "\"Tiếng Việt\""
        );
        assert_eq!(SupportedLanguage::from_code("ms"), Some(SupportedLanguage::Malay));
        assert_eq!(SupportedLanguage::from_code("fr"), None);
        assert_eq!(SupportedLanguage::from_code("id").unwrap().label(), "Bahasa Indonesia");
    }
}
