use serde::Deserialize;

use super::AnalysisError;
use crate::config;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-pro";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: String,
}

impl GeminiClient {
    pub fn from_env() -> Result<Self, AnalysisError> {
        let api_key = config::gemini_api_key().ok_or(AnalysisError::MissingApiKey)?;
        Ok(GeminiClient {
            http: reqwest::Client::new(),
            api_key,
        })
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, AnalysisError> {
        let url = format!("{}/{}:generateContent?key={}", API_BASE, MODEL, self.api_key);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let reply: GenerateContentResponse = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| AnalysisError::Gemini(String::from("empty model reply")))
    }

    pub async fn analyze_features(&self, ocr_text: &[String]) -> Result<Vec<String>, AnalysisError> {
        let reply = self.generate_content(&feature_prompt(ocr_text)).await?;
        Ok(parse_feature_list(&reply))
    }

    pub async fn generate_prd(
        &self,
        ocr_text: &[String],
        features: &[String],
    ) -> Result<String, AnalysisError> {
        self.generate_content(&prd_prompt(ocr_text, features)).await
    }

    pub async fn generate_business_plan(
        &self,
        ocr_text: &[String],
        features: &[String],
    ) -> Result<String, AnalysisError> {
        self.generate_content(&business_plan_prompt(ocr_text, features))
            .await
    }
}

/// One feature per non-blank reply line.
pub fn parse_feature_list(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn feature_prompt(ocr_text: &[String]) -> String {
    format!(
        "Analyze the following app screen text and identify key features and user flows:\n\n\
         {}\n\n\
         List the main features and functionality you can identify.",
        ocr_text.join("\n")
    )
}

fn prd_prompt(ocr_text: &[String], features: &[String]) -> String {
    format!(
        "Based on the following app screen text and features, generate a detailed PRD document in markdown format:\n\n\
         Screen Text:\n{}\n\n\
         Features:\n{}\n\n\
         The PRD should include:\n\
         1. Application Positioning\n\
         2. Target Audience\n\
         3. Navigation Structure\n\
         4. Interface Screenshots (reference the analyzed screens)\n\
         5. Technical Implementation\n\
         6. Data Flow\n\
         7. Test Plan\n\n\
         Format the output as a proper markdown document with sections and subsections.",
        ocr_text.join("\n"),
        features.join("\n")
    )
}

fn business_plan_prompt(ocr_text: &[String], features: &[String]) -> String {
    format!(
        "Based on the following app screen text and features, generate a comprehensive business plan in markdown format:\n\n\
         Screen Text:\n{}\n\n\
         Features:\n{}\n\n\
         The business plan should include:\n\
         1. Market Positioning\n\
         2. User Personas\n\
         3. Problem Solution\n\
         4. Revenue Model\n\
         5. Competitor Analysis\n\
         6. Marketing Strategy\n\n\
         Format the output as a proper markdown document with sections and subsections.",
        ocr_text.join("\n"),
        features.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_list_drops_blank_lines() {
        let reply = "Login screen\n\n  \nUpload flow\n  Settings  \n";
        assert_eq!(
            parse_feature_list(reply),
            vec!["Login screen", "Upload flow", "Settings"]
        );
    }

    #[test]
    fn feature_list_of_blank_reply_is_empty() {
        assert!(parse_feature_list("\n \n").is_empty());
    }

    #[test]
    fn prompts_embed_screen_text_and_features() {
        let ocr = vec![String::from("Sign in"), String::from("Continue")];
        let features = vec![String::from("Email login")];

        let feature = feature_prompt(&ocr);
        assert!(feature.contains("Sign in\nContinue"));

        let prd = prd_prompt(&ocr, &features);
        assert!(prd.contains("Sign in\nContinue"));
        assert!(prd.contains("Email login"));
        assert!(prd.contains("Test Plan"));

        let plan = business_plan_prompt(&ocr, &features);
        assert!(plan.contains("Email login"));
        assert!(plan.contains("Revenue Model"));
    }

    #[test]
    fn reply_parsing_takes_first_candidate_part() {
        let raw = r##"{
            "candidates": [
                { "content": { "parts": [{ "text": "# PRD" }, { "text": "ignored" }] } }
            ]
        }"##;
        let reply: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let text = reply
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text);
        assert_eq!(text.as_deref(), Some("# PRD"));
    }

    #[test]
    fn reply_without_candidates_parses_as_empty() {
        let reply: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(reply.candidates.is_empty());
    }
}
