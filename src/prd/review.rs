//! PRD review
//!
//! Completeness review, feedback-driven revision, and the 13-item
//! AI-friendliness upgrade checklist.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::ai::{SharedProvider, extract_json_from_response};
use crate::prd::prompts;
use crate::types::{PrdError, Result};

/// (group key, group title, [(item key, item label)])
type GroupSpec = (&'static str, &'static str, &'static [(&'static str, &'static str)]);

const CHECKLIST_SPEC: [GroupSpec; 3] = [
    (
        "basic",
        "Basic",
        &[
            ("problem_statement", "Clear problem statement"),
            ("success_metrics", "Quantifiable success metrics"),
            ("user_scenarios", "Concrete user scenarios"),
            ("priority", "Priorities are ranked"),
            ("timeline", "Timeline estimate"),
        ],
    ),
    (
        "ai_friendly",
        "AI-friendly",
        &[
            ("structured_format", "Structured format (JSON/YAML/Markdown)"),
            ("term_definition", "Domain terms are defined"),
            ("sample_data", "Complete sample data"),
        ],
    ),
    (
        "executable",
        "Executable",
        &[
            ("user_story", "Converts directly into user stories"),
            ("test_cases", "Test cases can be derived"),
            ("api_spec", "API specification can be derived"),
            ("wireframe", "Wireframes can be drawn"),
            ("time_estimate", "Development time can be estimated"),
        ],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub key: &'static str,
    pub label: &'static str,
    pub passed: bool,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistGroup {
    pub key: &'static str,
    pub title: &'static str,
    pub items: Vec<ChecklistItem>,
}

/// Result of the upgrade check; always holds all 13 items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeChecklist {
    pub groups: Vec<ChecklistGroup>,
}

impl UpgradeChecklist {
    /// Read the model's answer. Groups or items it left out count as not
    /// passed. Returns `None` if the top-level value is not an object.
    pub fn from_json_value(value: &Value) -> Option<Self> {
        let root = value.as_object()?;

        let groups = CHECKLIST_SPEC
            .iter()
            .map(|&(group_key, title, items)| {
                let group = root.get(group_key).and_then(Value::as_object);
                ChecklistGroup {
                    key: group_key,
                    title,
                    items: items
                        .iter()
                        .map(|&(key, label)| {
                            let (passed, suggestion) = group
                                .and_then(|g| g.get(key))
                                .map(read_item)
                                .unwrap_or_default();
                            ChecklistItem {
                                key,
                                label,
                                passed,
                                suggestion,
                            }
                        })
                        .collect(),
                }
            })
            .collect();

        Some(Self { groups })
    }

    pub fn items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    pub fn passed_count(&self) -> usize {
        self.items().filter(|i| i.passed).count()
    }

    pub fn total(&self) -> usize {
        self.items().count()
    }

    /// Non-empty suggestions of failed items, in checklist order
    pub fn failing_suggestions(&self) -> Vec<String> {
        self.items()
            .filter(|i| !i.passed && !i.suggestion.trim().is_empty())
            .map(|i| i.suggestion.trim().to_string())
            .collect()
    }
}

/// `{"passed": .., "suggestion": ..}`, tolerating a bare boolean and
/// stringly-typed booleans.
fn read_item(value: &Value) -> (bool, String) {
    let as_bool = |v: &Value| match v {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    };

    match value {
        Value::Object(map) => (
            map.get("passed").map(as_bool).unwrap_or(false),
            map.get("suggestion")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        ),
        other => (as_bool(other), String::new()),
    }
}

fn checklist_items_text() -> String {
    let mut n = 0;
    CHECKLIST_SPEC
        .iter()
        .map(|(group_key, title, items)| {
            let lines = items
                .iter()
                .map(|(key, label)| {
                    n += 1;
                    format!("{}. {} - {}", n, key, label)
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("{} (\"{}\"):\n{}", title, group_key, lines)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

// =============================================================================
// Reviewer
// =============================================================================

pub struct PrdReviewer {
    provider: SharedProvider,
    language: String,
}

impl PrdReviewer {
    pub fn new(provider: SharedProvider, language: impl Into<String>) -> Self {
        Self {
            provider,
            language: language.into(),
        }
    }

    /// Markdown completeness review: gaps, risks, ambiguities, open questions
    pub async fn review(&self, prd: &str) -> Result<String> {
        info!("Reviewing PRD completeness (model: {})", self.provider.model());
        self.complete_text(&prompts::review_prompt(prd, &self.language))
            .await
    }

    /// Rewrite `prd` so that it addresses `review`
    pub async fn revise(&self, prd: &str, review: &str) -> Result<String> {
        info!("Revising PRD from review feedback");
        self.complete_text(&prompts::revise_prompt(prd, review, &self.language))
            .await
    }

    pub async fn upgrade_checklist(&self, prd: &str) -> Result<UpgradeChecklist> {
        info!("Running upgrade checklist (model: {})", self.provider.model());

        let prompt = prompts::checklist_prompt(prd, &checklist_items_text(), &self.language);
        let reply = self.provider.complete(&prompt).await?.content;

        let value = extract_json_from_response(&reply)?;
        let checklist = UpgradeChecklist::from_json_value(&value).ok_or_else(|| {
            PrdError::Validation("Checklist reply is not a JSON object".to_string())
        })?;

        debug!(
            "Checklist passed {}/{}",
            checklist.passed_count(),
            checklist.total()
        );
        Ok(checklist)
    }

    /// Rewrite `prd` against the failed checklist items.
    ///
    /// Returns `Ok(None)` without calling the model when nothing failed.
    pub async fn upgrade(&self, prd: &str, checklist: &UpgradeChecklist) -> Result<Option<String>> {
        let suggestions = checklist.failing_suggestions();
        if suggestions.is_empty() {
            info!("All checklist items passed, nothing to upgrade");
            return Ok(None);
        }

        info!("Upgrading PRD with {} suggestions", suggestions.len());
        let feedback = prompts::upgrade_feedback(&suggestions);
        self.revise(prd, &feedback).await.map(Some)
    }

    async fn complete_text(&self, prompt: &str) -> Result<String> {
        let response = self.provider.complete(prompt).await?;
        let text = response.content.trim();
        if text.is_empty() {
            return Err(PrdError::LlmApi(format!(
                "{} returned an empty response",
                self.provider.name()
            )));
        }
        Ok(text.to_string())
    }
}
