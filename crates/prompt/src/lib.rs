//! Instruction construction for the AI service.
//!
//! Turns UI-level requests into the natural-language instructions and
//! response schemas sent to the model:
//! - Risk analysis (examiner persona, JSON reply)
//! - Safe logo generation (square image output)
//! - Legal advice (three-section Markdown)

use serde_json::{json, Value};
use trulogo_model::RiskLevel;

/// Countries the examiner persona checks against.
pub const JURISDICTIONS: [&str; 5] = ["Indonesia", "Vietnam", "Thailand", "Singapore", "Malaysia"];

/// Aspect ratio requested for generated logos.
pub const LOGO_ASPECT_RATIO: &str = "1:1";

/// Resolution tier requested for generated logos.
pub const LOGO_IMAGE_SIZE: &str = "1K";

/// Sections the advice reply must contain, in order.
pub const ADVICE_SECTIONS: [&str; 3] = [
    "Immediate Actions",
    "Filing Suggestions",
    "Risk Mitigation Strategy",
];

/// Trait for request types that render to an instruction string.
pub trait Prompt {
    fn render(&self) -> String;
}

/// Instruction for logo risk analysis.
#[derive(Debug, Clone)]
pub struct AnalysisPrompt<'a> {
    pub brand_name: &'a str,
    pub context: &'a str,
}

impl Prompt for AnalysisPrompt<'_> {
    fn render(&self) -> String {
        format!(
            r#"Act as a senior Trademark Examiner and IP Lawyer for the South East Asian (ASEAN) and Global market.
Analyze the provided logo image and the brand name "{brand}".
Context: {context}

Check for:
1. Visual similarity to famous global or ASEAN brands ({jurisdictions}).
2. Use of prohibited symbols (National Emblems, Royal Insignia, ASEAN symbols, Red Cross, etc.).
3. Offensive or sensitive imagery within Asian cultural contexts.
4. Genericness (is it too simple to be trademarked?).

Return a JSON object strictly adhering to this schema:
{{
  "riskScore": number (0-100),
  "riskLevel": "Low" | "Medium" | "High" | "Critical",
  "summary": "Short executive summary of findings",
  "flags": ["list", "of", "specific", "issues", "found"],
  "visualFeatures": ["list", "of", "key", "visual", "elements"],
  "similarTrademarks": [
    {{ "name": "Similar Brand", "similarityScore": number (0-100), "classId": "Class XX", "status": "Registered", "owner": "Company Name" }}
  ],
  "recommendationSummary": "One sentence legal advice"
}}"#,
            brand = self.brand_name,
            context = self.context,
            jurisdictions = JURISDICTIONS.join(", "),
        )
    }
}

/// Instruction for trademark-safe logo generation.
#[derive(Debug, Clone)]
pub struct GenerationPrompt<'a> {
    pub description: &'a str,
    pub style: &'a str,
}

impl Prompt for GenerationPrompt<'_> {
    fn render(&self) -> String {
        format!(
            "Create a professional logo for a South East Asian company with this description: {}.\n\
             Style: {}.\n\
             Ensure the logo is unique, distinctive, and avoids using generic clipart or restricted national symbols.\n\
             Design it to be trademark-safe. Elegant and modern aesthetic.",
            self.description, self.style
        )
    }
}

/// Instruction for structured legal advice.
#[derive(Debug, Clone)]
pub struct AdvicePrompt<'a> {
    pub risk_level: RiskLevel,
    pub context: &'a str,
}

impl Prompt for AdvicePrompt<'_> {
    fn render(&self) -> String {
        format!(
            "Provide detailed legal recommendations for a South East Asian (ASEAN) MSME trying to register a trademark.\n\
             The current risk level analyzed is: {}.\n\
             Context/Issues found: {}.\n\n\
             Provide output in Markdown format with sections:\n\
             1. {}\n\
             2. {} (Mention ASEAN TMview or WIPO Madrid System where relevant)\n\
             3. {}\n",
            self.risk_level,
            self.context,
            ADVICE_SECTIONS[0],
            ADVICE_SECTIONS[1],
            ADVICE_SECTIONS[2],
        )
    }
}

/// Response schema hint attached to analysis requests.
///
/// The service treats this as a hint only; replies are still parsed and
/// checked on receipt.
pub fn analysis_response_schema() -> Value {
    let levels: Vec<&str> = RiskLevel::ALL.iter().map(|l| l.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "riskScore": { "type": "NUMBER" },
            "riskLevel": { "type": "STRING", "enum": levels },
            "summary": { "type": "STRING" },
            "flags": { "type": "ARRAY", "items": { "type": "STRING" } },
            "visualFeatures": { "type": "ARRAY", "items": { "type": "STRING" } },
            "recommendationSummary": { "type": "STRING" },
            "similarTrademarks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "similarityScore": { "type": "NUMBER" },
                        "classId": { "type": "STRING" },
                        "status": { "type": "STRING" },
                        "owner": { "type": "STRING" }
                    }
                }
            }
        },
        "required": ["riskScore", "riskLevel"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_embeds_inputs() {
        let prompt = AnalysisPrompt {
            brand_name: "Acme",
            context: "Coffee shop in Jakarta",
        }
        .render();
        assert!(prompt.contains("brand name \"Acme\""));
        assert!(prompt.contains("Context: Coffee shop in Jakarta"));
        assert!(prompt.contains("Indonesia, Vietnam, Thailand, Singapore, Malaysia"));
        assert!(prompt.contains("\"riskLevel\": \"Low\" | \"Medium\""));
    }

    #[test]
    fn test_analysis_prompt_empty_context() {
        let prompt = AnalysisPrompt {
            brand_name: "Acme",
            context: "",
        }
        .render();
        assert!(prompt.contains("Context: \n"));
    }

    #[test]
    fn test_generation_prompt() {
        let prompt = GenerationPrompt {
            description: "batik textile brand",
            style: "minimalist",
        }
        .render();
        assert!(prompt.contains("description: batik textile brand."));
        assert!(prompt.contains("Style: minimalist."));
        assert!(prompt.contains("trademark-safe"));
    }

    #[test]
    fn test_advice_prompt_sections() {
        let prompt = AdvicePrompt {
            risk_level: RiskLevel::Critical,
            context: "shield shape",
        }
        .render();
        assert!(prompt.contains("risk level analyzed is: Critical."));
        let positions: Vec<usize> = ADVICE_SECTIONS
            .iter()
            .map(|s| prompt.find(s).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(prompt.contains("WIPO Madrid System"));
    }

    #[test]
    fn test_schema_lists_all_levels() {
        let schema = analysis_response_schema();
        let levels = schema["properties"]["riskLevel"]["enum"].as_array().unwrap();
        assert_eq!(levels.len(), 4);
        assert_eq!(levels[3], "Critical");
        assert_eq!(
            schema["properties"]["similarTrademarks"]["items"]["properties"]["classId"]["type"],
            "STRING"
        );
    }
}
