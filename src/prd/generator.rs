//! First-draft PRD generation

use tracing::info;

use crate::ai::SharedProvider;
use crate::constants::UNDEFINED_FIELD;
use crate::prd::{DevelopmentMode, prompts};
use crate::types::{PrdError, Result, StructuredRequirements};

pub struct PrdGenerator {
    provider: SharedProvider,
    language: String,
}

impl PrdGenerator {
    pub fn new(provider: SharedProvider, language: impl Into<String>) -> Self {
        Self {
            provider,
            language: language.into(),
        }
    }

    /// Draft a PRD from `requirements` using the template of `mode`.
    pub async fn generate(
        &self,
        requirements: &StructuredRequirements,
        mode: DevelopmentMode,
    ) -> Result<String> {
        if !requirements.is_complete() {
            tracing::warn!(
                "Generating PRD with unanswered required fields: {:?}",
                requirements.missing_required()
            );
        }

        let context = requirements_context(requirements);
        let prompt = prompts::prd_prompt(mode, &context, &self.language);

        info!(
            "Generating {} PRD (model: {})",
            mode.display_name(),
            self.provider.model()
        );

        let response = self.provider.complete(&prompt).await?;
        let prd = response.content.trim();
        if prd.is_empty() {
            return Err(PrdError::LlmApi(format!(
                "{} returned an empty PRD",
                self.provider.name()
            )));
        }

        Ok(prd.to_string())
    }
}

/// Labelled requirement block shared by every mode template
pub fn requirements_context(req: &StructuredRequirements) -> String {
    let v = |s: &str| -> String {
        if s.trim().is_empty() {
            UNDEFINED_FIELD.to_string()
        } else {
            s.trim().to_string()
        }
    };

    format!(
        "收集到的需求信息：\n\n\
         【核心問題】\n\
         問題描述：{}\n\
         痛點程度：{}/10\n\
         不解決的後果：{}\n\n\
         【用戶輪廓】\n\
         目標用戶：{}\n\
         現有解決方案：{}\n\
         付費意願：{}\n\n\
         【成功定義】\n\
         成功標準：{}\n\
         量化指標：{}\n\
         MVP 功能：{}\n",
        v(&req.stage_0.problem_description),
        v(&req.stage_0.pain_level),
        v(&req.stage_0.consequences),
        v(&req.stage_1.target_users),
        v(&req.stage_1.current_solution),
        v(&req.stage_1.willingness_to_pay),
        v(&req.stage_2.success_criteria),
        v(&req.stage_2.measurable_metrics),
        v(&req.stage_2.mvp_features),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prd::test_support::MockProvider;
    use crate::types::CoreProblem;

    #[test]
    fn test_context_marks_blank_fields() {
        let req = StructuredRequirements {
            stage_0: CoreProblem {
                problem_description: "  Lost stamps ".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let context = requirements_context(&req);
        assert!(context.contains("問題描述：Lost stamps\n"));
        assert!(context.contains("痛點程度：未定義/10"));
        assert!(context.contains("MVP 功能：未定義"));
        assert!(context.contains("【成功定義】"));
    }

    #[tokio::test]
    async fn test_generate_uses_mode_template() {
        let mock = MockProvider::replying("\n# Cafe Stamps - AI-DLC Sprint Spec\n");
        let generator = PrdGenerator::new(mock.shared(), "English");

        let prd = generator
            .generate(&StructuredRequirements::default(), DevelopmentMode::Sprint)
            .await
            .unwrap();

        assert_eq!(prd, "# Cafe Stamps - AI-DLC Sprint Spec");
        let prompt = &mock.prompts()[0];
        assert!(prompt.contains("Day-by-Day Execution Plan"));
        assert!(prompt.contains("in English"));
    }

    #[tokio::test]
    async fn test_generate_propagates_failure() {
        let mock = MockProvider::failing("HTTP 401");
        let generator = PrdGenerator::new(mock.shared(), "English");

        let result = generator
            .generate(&StructuredRequirements::default(), DevelopmentMode::Tdd)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_reply() {
        let mock = MockProvider::replying("   ");
        let generator = PrdGenerator::new(mock.shared(), "English");

        let err = generator
            .generate(&StructuredRequirements::default(), DevelopmentMode::Ddd)
            .await
            .unwrap_err();
        assert!(matches!(err, PrdError::LlmApi(_)));
    }
}
