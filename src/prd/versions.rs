//! Multi-version PRD generation
//!
//! Expands one PRD into MVP, standard and ideal variants with a single
//! model call, then splits the reply with [`segment`].

use tracing::{info, warn};

use crate::ai::SharedProvider;
use crate::prd::prompts::{self, IDEAL_HEADING, MVP_HEADING, STANDARD_HEADING};
use crate::prd::segment;
use crate::types::{PrdError, StructuredRequirements, VersionBundle};

pub struct VersionGenerator {
    provider: SharedProvider,
    language: String,
}

impl VersionGenerator {
    pub fn new(provider: SharedProvider, language: impl Into<String>) -> Self {
        Self {
            provider,
            language: language.into(),
        }
    }

    /// Never fails: a failed call yields one placeholder document per
    /// version carrying the error message.
    pub async fn generate_versions(&self, initial_prd: &str) -> VersionBundle {
        let prompt = prompts::versions_prompt(initial_prd, &self.language);

        info!(
            "Generating MVP/standard/ideal versions (model: {})",
            self.provider.model()
        );

        let reply = match self.provider.complete(&prompt).await {
            Ok(response) if !response.content.trim().is_empty() => response.content,
            Ok(_) => {
                return Self::failed(&PrdError::LlmApi("empty response".to_string()).to_string());
            }
            Err(e) => return Self::failed(&e.user_message(self.provider.name())),
        };

        let bundle = segment(&reply);
        if bundle.comparison.is_none() {
            warn!("Version reply has no comparison table");
        }
        bundle
    }

    fn failed(message: &str) -> VersionBundle {
        warn!("Version generation failed: {}", message);
        let doc = |heading: &str| format!("{}\n\n生成失敗: {}", heading, message);
        VersionBundle {
            mvp: doc(MVP_HEADING),
            standard: doc(STANDARD_HEADING),
            ideal: doc(IDEAL_HEADING),
            comparison: None,
        }
    }
}

/// Single Markdown document holding the requirements, the initial PRD and
/// all three versions.
pub fn combined_document(
    requirements: &StructuredRequirements,
    initial_prd: &str,
    bundle: &VersionBundle,
) -> String {
    let requirements_json =
        serde_json::to_string_pretty(requirements).unwrap_or_else(|_| "{}".to_string());

    let mut doc = format!(
        "# 完整 PRD 文檔\n\n\
         ## 原始需求\n```json\n{}\n```\n\n\
         ## 初版 PRD\n{}\n\n\
         ## MVP版\n{}\n\n\
         ## 標準版\n{}\n\n\
         ## 理想版\n{}\n",
        requirements_json,
        initial_prd.trim_end(),
        bundle.mvp.trim_end(),
        bundle.standard.trim_end(),
        bundle.ideal.trim_end(),
    );

    if let Some(table) = &bundle.comparison {
        doc.push_str(&format!("\n## 版本比較\n{}\n", table.trim_end()));
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prd::test_support::MockProvider;

    const REPLY: &str = "# MVP版 PRD\n## 1. 版本定位\n快速驗證\n\n# 標準版 PRD\n完整體驗\n\n# 理想版 PRD\n行業領先\n\n# 版本比較\n| 比較項目 | MVP版 | 標準版 | 理想版 |\n|---|---|---|---|\n| 開發時間 | 7天 | 1個月 | 不限 |";

    #[tokio::test]
    async fn test_generate_versions_segments_reply() {
        let mock = MockProvider::replying(REPLY);
        let generator = VersionGenerator::new(mock.shared(), "Traditional Chinese");

        let bundle = generator.generate_versions("# Draft PRD").await;
        assert_eq!(bundle.mvp, "# MVP版 PRD\n## 1. 版本定位\n快速驗證");
        assert_eq!(bundle.standard, "# 標準版 PRD\n完整體驗");
        assert_eq!(bundle.ideal, "# 理想版 PRD\n行業領先");
        assert!(bundle.comparison.unwrap().contains("| 開發時間 | 7天 |"));
        assert!(mock.prompts()[0].contains("# Draft PRD"));
    }

    #[tokio::test]
    async fn test_failure_yields_placeholders() {
        let mock = MockProvider::failing("rate limit exceeded");
        let generator = VersionGenerator::new(mock.shared(), "Traditional Chinese");

        let bundle = generator.generate_versions("# Draft").await;
        assert!(bundle.mvp.starts_with("# MVP版 PRD\n\n生成失敗: "));
        assert!(bundle.standard.starts_with("# 標準版 PRD"));
        assert!(bundle.ideal.contains("rate limit exceeded"));
        assert_eq!(bundle.comparison, None);
    }

    #[tokio::test]
    async fn test_empty_reply_is_failure() {
        let mock = MockProvider::replying("");
        let generator = VersionGenerator::new(mock.shared(), "Traditional Chinese");

        let bundle = generator.generate_versions("# Draft").await;
        assert!(bundle.ideal.contains("生成失敗"));
    }

    #[test]
    fn test_combined_document_sections() {
        let bundle = VersionBundle {
            mvp: "M".into(),
            standard: "S".into(),
            ideal: "I".into(),
            comparison: None,
        };
        let doc = combined_document(&StructuredRequirements::default(), "P\n", &bundle);

        assert!(doc.contains("## 原始需求\n```json\n{"));
        assert!(doc.contains("\"stage_2\""));
        assert!(doc.contains("## 初版 PRD\nP\n\n## MVP版\nM"));
        assert!(doc.contains("## 理想版\nI\n"));
        assert!(!doc.contains("版本比較"));
    }
}
