//! Requirement extraction
//!
//! Turns a questionnaire transcript into a [`StructuredRequirements`] record
//! with one model call. The model is asked for JSON only, but its reply is
//! treated as untrusted text: the JSON candidate is located, repaired if
//! needed, and coerced into the fixed shape. Every failure degrades to the
//! all-empty record.

use tracing::{debug, info, warn};

use crate::ai::{SharedProvider, extract_json_from_response};
use crate::prd::prompts;
use crate::types::{StructuredRequirements, Transcript};

/// Extraction result with the reason it fell back, if it did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub requirements: StructuredRequirements,
    /// Human-readable failure message; `None` when the reply was usable
    pub failure: Option<String>,
}

impl Extraction {
    fn failed(message: String) -> Self {
        warn!("Requirement extraction fell back to empty record: {}", message);
        Self {
            requirements: StructuredRequirements::default(),
            failure: Some(message),
        }
    }
}

pub struct RequirementExtractor {
    provider: SharedProvider,
}

impl RequirementExtractor {
    pub fn new(provider: SharedProvider) -> Self {
        Self { provider }
    }

    /// Extract requirements, always returning all three stages.
    pub async fn extract(&self, transcript: &Transcript) -> StructuredRequirements {
        self.extract_detailed(transcript).await.requirements
    }

    /// Same as [`extract`](Self::extract), keeping the failure message.
    pub async fn extract_detailed(&self, transcript: &Transcript) -> Extraction {
        let prompt = prompts::extraction_prompt(&transcript.render());

        info!(
            "Extracting requirements from {} turns (model: {})",
            transcript.len(),
            self.provider.model()
        );

        let reply = match self.provider.complete(&prompt).await {
            Ok(response) => response.content,
            Err(e) => {
                return Extraction::failed(format!(
                    "Requirement extraction failed: {}",
                    e.user_message(self.provider.name())
                ));
            }
        };

        let value = match extract_json_from_response(&reply) {
            Ok(value) => value,
            Err(e) => {
                return Extraction::failed(format!("Model reply is not valid JSON: {}", e));
            }
        };

        match StructuredRequirements::from_json_value(&value) {
            Some(requirements) => {
                debug!(
                    "Extracted {} of 9 answers, missing required: {:?}",
                    requirements.answered_count(),
                    requirements.missing_required()
                );
                Extraction {
                    requirements,
                    failure: None,
                }
            }
            None => Extraction::failed(format!(
                "Model reply is JSON but not an object (got {})",
                json_kind(&value)
            )),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prd::test_support::MockProvider;
    use crate::types::is_complete;

    fn transcript() -> Transcript {
        let mut t = Transcript::new();
        t.push_assistant("What problem do you want to solve?");
        t.push_user("Small cafes lose track of loyalty stamps.");
        t
    }

    const FULL_REPLY: &str = r#"{
        "stage_0": {"problem_description": "Cafes lose loyalty stamps", "pain_level": 7, "consequences": "Churn"},
        "stage_1": {"target_users": "Cafe owners", "current_solution": "Paper cards", "willingness_to_pay": "NT$300/month"},
        "stage_2": {"success_criteria": "Owners stop printing cards", "measurable_metrics": ["repeat visits +20%", "NPS 40"], "mvp_features": "QR stamp card"}
    }"#;

    #[tokio::test]
    async fn test_extract_plain_json() {
        let mock = MockProvider::replying(FULL_REPLY);
        let extractor = RequirementExtractor::new(mock.shared());

        let result = extractor.extract_detailed(&transcript()).await;
        assert_eq!(result.failure, None);

        let req = result.requirements;
        assert_eq!(req.stage_0.pain_level, "7");
        assert_eq!(req.stage_2.measurable_metrics, "repeat visits +20%, NPS 40");
        assert!(is_complete(&req));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_embeds_rendered_transcript() {
        let mock = MockProvider::replying("{}");
        let extractor = RequirementExtractor::new(mock.shared());
        extractor.extract(&transcript()).await;

        let prompt = &mock.prompts()[0];
        assert!(prompt.contains(
            "assistant: What problem do you want to solve?\n\nuser: Small cafes lose track of loyalty stamps."
        ));
    }

    #[tokio::test]
    async fn test_extract_fenced_json_with_prose() {
        let reply = format!("Here is the summary:\n```json\n{}\n```\nLet me know!", FULL_REPLY);
        let mock = MockProvider::replying(&reply);
        let extractor = RequirementExtractor::new(mock.shared());

        let req = extractor.extract(&transcript()).await;
        assert_eq!(req.stage_1.target_users, "Cafe owners");
    }

    #[tokio::test]
    async fn test_partial_json_fills_missing_with_empty() {
        let mock = MockProvider::replying(
            r#"{"stage_0": {"problem_description": "X"}, "stage_1": "n/a", "extra": 1}"#,
        );
        let extractor = RequirementExtractor::new(mock.shared());

        let req = extractor.extract(&transcript()).await;
        assert_eq!(req.stage_0.problem_description, "X");
        assert_eq!(req.stage_0.pain_level, "");
        assert_eq!(req.stage_1.target_users, "");
        assert_eq!(req.stage_2.mvp_features, "");
        assert!(!is_complete(&req));
    }

    #[tokio::test]
    async fn test_prose_reply_falls_back_to_empty() {
        let mock = MockProvider::replying("Sorry, I could not find any requirements.");
        let extractor = RequirementExtractor::new(mock.shared());

        let result = extractor.extract_detailed(&transcript()).await;
        assert_eq!(result.requirements, StructuredRequirements::default());
        assert!(result.failure.is_some());
    }

    #[tokio::test]
    async fn test_non_object_json_falls_back_to_empty() {
        let mock = MockProvider::replying(r#"["not", "an", "object"]"#);
        let extractor = RequirementExtractor::new(mock.shared());

        let result = extractor.extract_detailed(&transcript()).await;
        assert_eq!(result.requirements, StructuredRequirements::default());
        assert!(result.failure.unwrap().contains("array"));
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back_to_empty() {
        let mock = MockProvider::failing("connection reset");
        let extractor = RequirementExtractor::new(mock.shared());

        let result = extractor.extract_detailed(&transcript()).await;
        assert_eq!(result.requirements, StructuredRequirements::default());
        assert!(result.failure.unwrap().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_empty_transcript_still_calls_model() {
        let mock = MockProvider::replying("{}");
        let extractor = RequirementExtractor::new(mock.shared());

        let req = extractor.extract(&Transcript::new()).await;
        assert_eq!(req, StructuredRequirements::default());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_legacy_stage_aliases() {
        let mock = MockProvider::replying(
            r#"{"core_problem": {"problem_description": "P"}, "user_profile": {"target_users": "U"}}"#,
        );
        let extractor = RequirementExtractor::new(mock.shared());

        let req = extractor.extract(&transcript()).await;
        assert_eq!(req.stage_0.problem_description, "P");
        assert_eq!(req.stage_1.target_users, "U");
    }
}
