//! Development modes
//!
//! Each mode selects a PRD template. `assess` scores how well the collected
//! requirements fit a mode by counting indicator keywords in the answers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{PrdError, StructuredRequirements};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevelopmentMode {
    /// 48-72 hour solo MVP
    Sprint,
    /// Test-driven, quality first
    Tdd,
    /// Behaviour-driven, stakeholder friendly
    Bdd,
    /// Domain-driven, for complex systems
    Ddd,
}

impl DevelopmentMode {
    pub const ALL: [DevelopmentMode; 4] = [Self::Sprint, Self::Tdd, Self::Bdd, Self::Ddd];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sprint => "sprint",
            Self::Tdd => "tdd",
            Self::Bdd => "bdd",
            Self::Ddd => "ddd",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Sprint => "AI-DLC Sprint",
            Self::Tdd => "TDD (Test-Driven Development)",
            Self::Bdd => "BDD (Behavior-Driven Development)",
            Self::Ddd => "DDD (Domain-Driven Design)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Sprint => "One developer ships an MVP in 48-72 hours",
            Self::Tdd => "Quality first: APIs, developer tools, systems that must not break",
            Self::Bdd => "User-facing products that need cross-team communication",
            Self::Ddd => "Complex, long-lived systems with rich business rules",
        }
    }

    /// Score how well `requirements` fit this mode
    pub fn assess(&self, requirements: &StructuredRequirements) -> ModeAssessment {
        let text = requirements.all_text().join(" ").to_lowercase();
        let hits = |indicators: &[&str]| indicators.iter().filter(|i| text.contains(*i)).count() as i32;

        match self {
            Self::Sprint => {
                let score = hits(SPRINT_INDICATORS) - hits(ANTI_SPRINT_INDICATORS);
                let (suitable, reason, suggestions) = if score >= 2 {
                    (true, "Requirements stress fast delivery and an MVP", SPRINT_FOCUSED)
                } else if score >= 0 {
                    (true, "Requirements fit rapid development", SPRINT_SIMPLIFY)
                } else {
                    (
                        false,
                        "Requirements look too complex for a 48-72 hour sprint",
                        SPRINT_UNSUITABLE,
                    )
                };
                ModeAssessment::new(*self, score, suitable, vec![reason], suggestions)
            }
            Self::Tdd => {
                let complexity = hits(TDD_COMPLEXITY_INDICATORS);
                let score = hits(TDD_TECHNICAL_INDICATORS) + complexity;
                let mut reasons = Vec::new();
                let suitable = score >= 3;
                if suitable {
                    reasons.push("Requirements have a clear technical focus");
                    if complexity >= 2 {
                        reasons.push("High system complexity benefits from test-first quality");
                    }
                } else {
                    reasons.push("Requirements lean towards business and user experience; consider BDD");
                }
                let suggestions = if suitable { TDD_SUITABLE } else { TDD_UNSUITABLE };
                ModeAssessment::new(*self, score, suitable, reasons, suggestions)
            }
            Self::Bdd => {
                let user = hits(BDD_USER_INDICATORS);
                let business = hits(BDD_BUSINESS_INDICATORS);
                let score = user + business + hits(BDD_COLLABORATION_INDICATORS);
                let mut reasons = Vec::new();
                let suitable = score >= 3;
                if suitable {
                    reasons.push("Requirements centre on users and business value");
                    if user >= 2 {
                        reasons.push("User experience matters; scenarios describe behaviour well");
                    }
                    if business >= 2 {
                        reasons.push("Clear business value suits cross-team collaboration");
                    }
                } else {
                    reasons.push("Requirements lean towards technical implementation; consider TDD");
                }
                let suggestions = if suitable { BDD_SUITABLE } else { BDD_UNSUITABLE };
                ModeAssessment::new(*self, score, suitable, reasons, suggestions)
            }
            Self::Ddd => {
                let complexity = hits(DDD_COMPLEXITY_INDICATORS);
                let domain = hits(DDD_DOMAIN_INDICATORS);
                let integration = hits(DDD_INTEGRATION_INDICATORS);
                let score = complexity + domain + integration;
                let mut reasons = Vec::new();
                let suitable = score >= 4;
                if suitable {
                    reasons.push("Requirements show high complexity and domain depth");
                    if complexity >= 2 {
                        reasons.push("System complexity needs clear architectural boundaries");
                    }
                    if domain >= 2 {
                        reasons.push("Rich business knowledge suits domain modelling");
                    }
                    if integration >= 2 {
                        reasons.push("Heavy integration is easier to manage with bounded contexts");
                    }
                } else if score <= 2 {
                    reasons.push("Requirements are relatively simple; consider BDD or TDD");
                } else {
                    reasons.push("Some complexity, but full DDD is probably unnecessary");
                }
                let suggestions = if suitable { DDD_SUITABLE } else { DDD_UNSUITABLE };
                ModeAssessment::new(*self, score, suitable, reasons, suggestions)
            }
        }
    }
}

/// Assess every mode, in [`DevelopmentMode::ALL`] order
pub fn assess_all(requirements: &StructuredRequirements) -> Vec<ModeAssessment> {
    DevelopmentMode::ALL
        .iter()
        .map(|mode| mode.assess(requirements))
        .collect()
}

/// Highest-scoring suitable mode; ties go to the earlier mode, and Sprint
/// is the fallback when nothing is suitable.
pub fn recommend(requirements: &StructuredRequirements) -> ModeAssessment {
    let assessments = assess_all(requirements);

    let best = assessments
        .iter()
        .filter(|a| a.suitable)
        .fold(None::<&ModeAssessment>, |best, a| match best {
            Some(b) if b.score >= a.score => Some(b),
            _ => Some(a),
        })
        .cloned();

    best.unwrap_or_else(|| DevelopmentMode::Sprint.assess(requirements))
}

impl fmt::Display for DevelopmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DevelopmentMode {
    type Err = PrdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sprint" | "ai-dlc" | "ai-dlc sprint" => Ok(Self::Sprint),
            "tdd" => Ok(Self::Tdd),
            "bdd" => Ok(Self::Bdd),
            "ddd" => Ok(Self::Ddd),
            other => Err(PrdError::Validation(format!(
                "Unknown development mode '{}'. Expected one of: sprint, tdd, bdd, ddd",
                other
            ))),
        }
    }
}

/// Result of scoring requirements against one mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeAssessment {
    pub mode: DevelopmentMode,
    pub score: i32,
    pub suitable: bool,
    pub reasons: Vec<String>,
    /// Next steps; the list differs for suitable and unsuitable results
    pub suggestions: Vec<String>,
}

impl ModeAssessment {
    fn new(
        mode: DevelopmentMode,
        score: i32,
        suitable: bool,
        reasons: Vec<&str>,
        suggestions: &[&str],
    ) -> Self {
        Self {
            mode,
            score,
            suitable,
            reasons: reasons.into_iter().map(String::from).collect(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// =============================================================================
// Suggestions
// =============================================================================

const SPRINT_FOCUSED: &[&str] = &[
    "Focus on the 3-5 most essential features",
    "List explicit non-features to stop scope creep",
    "Make sure every feature fits in 8 hours of work",
    "Prepare a 5-minute demo",
];

const SPRINT_SIMPLIFY: &[&str] = &[
    "Trim the feature scope further",
    "Lean on existing frameworks and tools to move faster",
    "Set a clear 48-72 hour delivery target",
];

const SPRINT_UNSUITABLE: &[&str] = &[
    "Consider TDD to secure quality",
    "Or use DDD for complex domain logic",
    "If you stay with a sprint, cut the requirements down hard",
];

const TDD_SUITABLE: &[&str] = &[
    "Focus on API design and test coverage",
    "Build a complete automated test pipeline",
    "Set explicit performance and quality standards",
    "Plan continuous integration and deployment",
];

const TDD_UNSUITABLE: &[&str] = &[
    "Consider BDD to describe user behaviour",
    "If TDD is required, add technical detail to the requirements",
    "BDD and TDD can be combined",
];

const BDD_SUITABLE: &[&str] = &[
    "Describe user stories in detail",
    "Define how the departments involved will collaborate",
    "Set user satisfaction and business metrics",
    "Plan continuous user experience improvements",
];

const BDD_UNSUITABLE: &[&str] = &[
    "For complex technical work, consider TDD",
    "If BDD is required, add user experience requirements",
    "TDD and BDD can be combined",
];

const DDD_SUITABLE: &[&str] = &[
    "Run a domain modelling workshop with business experts",
    "Identify the core subdomain and handle its logic first",
    "Establish a ubiquitous language for the team",
    "Design clear bounded contexts to contain complexity",
    "Consider an event-driven architecture for responsiveness and scale",
];

const DDD_UNSUITABLE: &[&str] = &[
    "Assess the real complexity before committing to DDD",
    "If the business logic is fairly simple, consider BDD",
    "If the technical challenge dominates, consider TDD",
    "A lightweight domain model may be enough without full DDD",
];

// =============================================================================
// Indicator keywords
// =============================================================================

const SPRINT_INDICATORS: &[&str] = &[
    "mvp", "快速", "週末", "單人", "個人", "solo", "48小時", "72小時", "兩天", "三天", "原型",
    "驗證", "poc", "概念驗證", "最小", "簡單",
];

const ANTI_SPRINT_INDICATORS: &[&str] = &[
    "企業級", "大型", "複雜系統", "多部門", "團隊", "長期", "完整", "全面", "企業",
];

const TDD_TECHNICAL_INDICATORS: &[&str] = &[
    "api", "sdk", "開發者", "技術", "系統", "架構", "效能", "安全", "穩定", "品質", "測試",
];

const TDD_COMPLEXITY_INDICATORS: &[&str] = &[
    "複雜", "高併發", "大量", "分散式", "微服務", "高可用", "容錯", "可擴展",
];

const BDD_USER_INDICATORS: &[&str] = &[
    "用戶", "客戶", "使用者", "體驗", "界面", "操作", "方便", "簡單", "直觀", "友善", "滿意",
];

const BDD_BUSINESS_INDICATORS: &[&str] = &[
    "業務", "商業", "營收", "轉換", "銷售", "市場", "競爭", "客戶", "服務", "流程", "效率",
];

const BDD_COLLABORATION_INDICATORS: &[&str] = &[
    "團隊", "協作", "溝通", "部門", "配合", "整合", "跨部門", "合作", "協調",
];

const DDD_COMPLEXITY_INDICATORS: &[&str] = &[
    "企業", "複雜", "大型", "多部門", "整合", "系統性", "長期", "演進", "架構", "規模", "分散式",
];

const DDD_DOMAIN_INDICATORS: &[&str] = &[
    "業務", "領域", "規則", "流程", "政策", "法規", "專業", "知識", "專家", "建模",
];

const DDD_INTEGRATION_INDICATORS: &[&str] = &[
    "整合", "系統", "平台", "介接", "交換", "同步", "協作", "互通", "連結", "橋接",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CoreProblem, SuccessDefinition, UserProfile};

    fn requirements(problem: &str, users: &str, features: &str) -> StructuredRequirements {
        StructuredRequirements {
            stage_0: CoreProblem {
                problem_description: problem.to_string(),
                ..Default::default()
            },
            stage_1: UserProfile {
                target_users: users.to_string(),
                ..Default::default()
            },
            stage_2: SuccessDefinition {
                mvp_features: features.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("TDD".parse::<DevelopmentMode>().unwrap(), DevelopmentMode::Tdd);
        assert_eq!(" sprint ".parse::<DevelopmentMode>().unwrap(), DevelopmentMode::Sprint);
        assert_eq!(DevelopmentMode::Ddd.to_string(), "ddd");
        assert!("waterfall".parse::<DevelopmentMode>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&DevelopmentMode::Bdd).unwrap();
        assert_eq!(json, "\"bdd\"");
    }

    #[test]
    fn test_empty_requirements_suit_sprint_only() {
        let req = StructuredRequirements::default();
        let sprint = DevelopmentMode::Sprint.assess(&req);
        assert_eq!(sprint.score, 0);
        assert!(sprint.suitable);

        for mode in [DevelopmentMode::Tdd, DevelopmentMode::Bdd, DevelopmentMode::Ddd] {
            assert!(!mode.assess(&req).suitable);
        }
        assert_eq!(recommend(&req).mode, DevelopmentMode::Sprint);
    }

    #[test]
    fn test_anti_sprint_indicators_subtract() {
        let req = requirements("企業級 大型 系統", "多部門 團隊", "");
        let sprint = DevelopmentMode::Sprint.assess(&req);
        assert!(sprint.score < 0);
        assert!(!sprint.suitable);
    }

    #[test]
    fn test_technical_requirements_recommend_tdd() {
        let req = requirements(
            "Our API and SDK fail under 高併發 load",
            "開發者",
            "分散式 測試 harness",
        );
        let tdd = DevelopmentMode::Tdd.assess(&req);
        assert!(tdd.suitable);
        assert!(tdd.score >= 3);
        assert_eq!(tdd.reasons.len(), 2);
        assert_eq!(recommend(&req).mode, DevelopmentMode::Tdd);
    }

    #[test]
    fn test_user_business_requirements_suit_bdd() {
        let req = requirements("客戶 體驗 很差", "使用者", "提升 銷售 轉換");
        let bdd = DevelopmentMode::Bdd.assess(&req);
        assert!(bdd.suitable);
        assert!(bdd.score >= 3);
    }

    #[test]
    fn test_ddd_threshold_is_four() {
        let three = requirements("業務 領域 規則", "", "");
        assert_eq!(DevelopmentMode::Ddd.assess(&three).score, 3);
        assert!(!DevelopmentMode::Ddd.assess(&three).suitable);

        let four = requirements("業務 領域 規則 法規", "", "");
        assert!(DevelopmentMode::Ddd.assess(&four).suitable);
    }

    #[test]
    fn test_suggestions_follow_suitability() {
        let technical = requirements("API SDK 系統 測試", "開發者", "");
        let tdd = DevelopmentMode::Tdd.assess(&technical);
        assert!(tdd.suitable);
        assert_eq!(tdd.suggestions.len(), 4);
        assert!(tdd.suggestions[0].contains("test coverage"));

        let simple = requirements("業務 領域", "", "");
        let ddd = DevelopmentMode::Ddd.assess(&simple);
        assert!(!ddd.suitable);
        assert_eq!(ddd.suggestions[0], "Assess the real complexity before committing to DDD");
    }

    #[test]
    fn test_sprint_suggestions_per_branch() {
        let focused = requirements("MVP 快速 原型", "", "");
        let sprint = DevelopmentMode::Sprint.assess(&focused);
        assert!(sprint.score >= 2);
        assert!(sprint.suggestions.iter().any(|s| s.contains("non-features")));

        let empty = DevelopmentMode::Sprint.assess(&StructuredRequirements::default());
        assert_eq!(empty.suggestions[2], "Set a clear 48-72 hour delivery target");
    }

    #[test]
    fn test_assess_all_order() {
        let modes: Vec<_> = assess_all(&StructuredRequirements::default())
            .into_iter()
            .map(|a| a.mode)
            .collect();
        assert_eq!(modes, DevelopmentMode::ALL.to_vec());
    }
}
