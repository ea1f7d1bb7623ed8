//! Offline remedy guidance for trademark risk results.
//!
//! Converts a risk level and its flags into deterministic, human-readable
//! next steps. This does not call the AI service, so it is always available
//! to show next to (or instead of) generated legal advice.

use serde::{Deserialize, Serialize};
use trulogo_model::{AnalysisResult, RiskLevel};

/// Flag keywords that point at restricted symbols.
const RESTRICTED_KEYWORDS: [&str; 6] = [
    "emblem",
    "insignia",
    "red cross",
    "national",
    "royal",
    "prohibited",
];

/// Structured guidance for one risk level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remedy {
    /// Short verdict
    pub status: String,

    /// The single recommended action
    pub action: String,

    /// Ordered steps to follow
    pub steps: Vec<String>,

    /// Caveat that applies even when following the steps
    pub warning: String,

    /// Per-flag warnings, most severe first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specific_warnings: Vec<String>,
}

fn steps(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Guidance for a bare risk level.
pub fn remedy_for(level: RiskLevel) -> Remedy {
    match level {
        RiskLevel::Low => Remedy {
            status: "Safe to Proceed".to_string(),
            action: "File for Trademark".to_string(),
            steps: steps(&[
                "Conduct a final search on ASEAN TMview and the WIPO Global Brand Database.",
                "Identify the correct Nice class for your goods/services.",
                "File with your national IP office, or via the WIPO Madrid System for several ASEAN members.",
                "Start using the \u{2122} symbol.",
            ]),
            warning: "Even low risk does not guarantee registration. Examiners may check phonetic similarity.".to_string(),
            specific_warnings: Vec::new(),
        },
        RiskLevel::Medium => Remedy {
            status: "Caution Advised".to_string(),
            action: "Consult IP Attorney & Consider Minor Redesign".to_string(),
            steps: steps(&[
                "Review the similar marks carefully.",
                "If your logo is very similar to a registered mark in the SAME class, you must redesign.",
                "If the similar marks are in different industries, you might be safe.",
                "Ask a trademark attorney for a search report.",
            ]),
            warning: "Proceeding without advice may lead to an opposition after publication.".to_string(),
            specific_warnings: Vec::new(),
        },
        RiskLevel::High => Remedy {
            status: "High Risk - Do Not Use".to_string(),
            action: "Rebranding Recommended".to_string(),
            steps: steps(&[
                "Your logo is dangerously similar to existing marks.",
                "Using this logo could lead to cease and desist notices or infringement claims.",
                "Use the regenerate tool to create a distinct alternative.",
                "Do not invest in printing or signage yet.",
            ]),
            warning: "High probability of refusal on relative grounds.".to_string(),
            specific_warnings: Vec::new(),
        },
        RiskLevel::Critical => Remedy {
            status: "Critical Risk - Stop".to_string(),
            action: "Immediate Rebranding Required".to_string(),
            steps: steps(&[
                "Stop all use of this logo.",
                "Check whether it contains restricted symbols such as national emblems, royal insignia or the Red Cross.",
                "Use the regenerate tool to create a distinct alternative.",
                "Consult an IP attorney before any public launch.",
            ]),
            warning: "Restricted symbols are refused on absolute grounds in every ASEAN member state.".to_string(),
            specific_warnings: Vec::new(),
        },
    }
}

/// Guidance for a full analysis result, including per-flag warnings.
pub fn remedy_for_result(result: &AnalysisResult) -> Remedy {
    let mut remedy = remedy_for(result.risk_level);

    let (critical, notes): (Vec<&String>, Vec<&String>) =
        result.flags.iter().partition(|f| is_restricted(f));

    remedy.specific_warnings = critical
        .into_iter()
        .map(|f| format!("CRITICAL: {}", f))
        .chain(notes.into_iter().map(|f| format!("Note: {}", f)))
        .collect();

    remedy
}

fn is_restricted(flag: &str) -> bool {
    let lower = flag.to_lowercase();
    RESTRICTED_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// One-line summary of an analysis result.
pub fn summarize_risk(result: &AnalysisResult) -> String {
    if result.is_fallback() {
        return "Analysis unavailable - no risk assessment was made.".to_string();
    }

    let level = match result.risk_level {
        RiskLevel::Critical => "CRITICAL RISK",
        RiskLevel::High => "HIGH RISK",
        RiskLevel::Medium => "MODERATE RISK",
        RiskLevel::Low => "LOW RISK",
    };

    let mut summary = format!("{} ({:.0}/100)", level, result.risk_score);

    if !result.flags.is_empty() {
        summary.push_str(": ");
        summary.push_str(&result.flags.join(", "));
    }

    if let Some(closest) = result.closest_match() {
        summary.push_str(&format!(
            " | closest mark: {} ({:.0}% similar)",
            closest.name, closest.similarity_score
        ));
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use trulogo_model::TrademarkMatch;

    fn result(level: RiskLevel, score: f64, flags: &[&str]) -> AnalysisResult {
        AnalysisResult {
            risk_score: score,
            risk_level: level,
            summary: String::new(),
            flags: flags.iter().map(|f| f.to_string()).collect(),
            visual_features: Vec::new(),
            similar_trademarks: Vec::new(),
            recommendation_summary: String::new(),
        }
    }

    #[test]
    fn test_every_level_has_guidance() {
        for level in RiskLevel::ALL {
            let remedy = remedy_for(level);
            assert!(!remedy.steps.is_empty());
            assert!(remedy.specific_warnings.is_empty());
        }
        assert_eq!(remedy_for(RiskLevel::Low).status, "Safe to Proceed");
        assert!(remedy_for(RiskLevel::Critical).action.contains("Immediate"));
    }

    #[test]
    fn test_restricted_flags_come_first() {
        let r = result(
            RiskLevel::High,
            80.0,
            &["Visual similarity", "National Emblem Misuse"],
        );
        let remedy = remedy_for_result(&r);
        assert_eq!(
            remedy.specific_warnings,
            vec![
                "CRITICAL: National Emblem Misuse".to_string(),
                "Note: Visual similarity".to_string(),
            ]
        );
    }

    #[test]
    fn test_specific_warnings_omitted_when_empty() {
        let json = serde_json::to_value(remedy_for(RiskLevel::Medium)).unwrap();
        assert!(json.get("specific_warnings").is_none());
    }

    #[test]
    fn test_summarize_risk() {
        let mut r = result(RiskLevel::High, 82.0, &["Visual similarity"]);
        r.similar_trademarks.push(TrademarkMatch::new("AcmeCo", 91.0));
        assert_eq!(
            summarize_risk(&r),
            "HIGH RISK (82/100): Visual similarity | closest mark: AcmeCo (91% similar)"
        );
    }

    #[test]
    fn test_summarize_fallback() {
        assert!(summarize_risk(&AnalysisResult::fallback()).starts_with("Analysis unavailable"));
    }
}
