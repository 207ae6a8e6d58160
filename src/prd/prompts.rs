//! Prompt texts for every model call in the PRD pipeline.
//!
//! Builders here are pure: they only assemble strings.

use crate::ai::{PromptBuilder, PromptTemplates};
use crate::constants::collection::COMPLETION_MARKER;
use crate::prd::DevelopmentMode;

/// Heading line the version generator asks for, per slot
pub const MVP_HEADING: &str = "# MVP版 PRD";
pub const STANDARD_HEADING: &str = "# 標準版 PRD";
pub const IDEAL_HEADING: &str = "# 理想版 PRD";
pub const COMPARISON_HEADING: &str = "# 版本比較";

const QUESTIONNAIRE: [&str; 9] = [
    "What problem do you want to solve? Describe the concrete pain users run into.",
    "How painful is it, on a 1-10 scale (1 = minor inconvenience, 10 = unbearable)? Why?",
    "What happens if the problem stays unsolved? What is the impact on users or the business?",
    "Who will use the product? Describe the target users (age, occupation, habits).",
    "How do they solve the problem today? Which tools or methods do they use?",
    "How much would they pay, or how much time would they invest, to solve it?",
    "What does success look like? Define concrete success criteria.",
    "Which metrics can be quantified (usage, satisfaction, efficiency gains)?",
    "Which core features must the MVP contain to address the basic pain?",
];

// =============================================================================
// Requirement collection
// =============================================================================

/// Prompt for the next coordinator turn.
///
/// `rendered_transcript` is empty for the opening greeting.
pub fn coordinator_prompt(rendered_transcript: &str, language: &str) -> String {
    let questions = QUESTIONNAIRE
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {}", i + 1, q))
        .collect::<Vec<_>>()
        .join("\n");

    let builder = PromptTemplates::product_manager("structured requirement interviews")
        .objectives(vec![
            "Collect answers to every question below, one or two questions per turn",
            "Ask a follow-up when an answer is vague",
            "Never write the PRD yourself; only collect requirements",
        ])
        .section("Questionnaire", &questions)
        .section(
            "When every question is answered",
            &format!(
                "Congratulate the user, summarize the key information in 3-5 bullet points, \
                 and state exactly: \"✅ {}！\" followed by a note that they can now choose a \
                 development mode and generate the PRD.",
                COMPLETION_MARKER
            ),
        );

    let builder = if rendered_transcript.trim().is_empty() {
        builder.section(
            "Conversation so far",
            "(none) Greet the user, introduce yourself as their product manager, and ask the first question.",
        )
    } else {
        builder
            .section("Conversation so far", rendered_transcript)
            .text("Reply as the assistant to the latest user message.")
    };

    builder.language(language).build()
}

/// Prompt asking for the nine-field requirement record as JSON
pub fn extraction_prompt(rendered_transcript: &str) -> String {
    PromptTemplates::json_only(
        PromptTemplates::product_manager("summarizing requirement interviews")
            .objectives(vec![
                "Read the conversation and fill in every field of the JSON shape below",
                "Use an empty string for any field the conversation does not answer",
                "Copy the user's wording; do not invent facts",
            ])
            .section("Conversation", rendered_transcript)
            .code(
                "json",
                r#"{
  "stage_0": {
    "problem_description": "",
    "pain_level": "",
    "consequences": ""
  },
  "stage_1": {
    "target_users": "",
    "current_solution": "",
    "willingness_to_pay": ""
  },
  "stage_2": {
    "success_criteria": "",
    "measurable_metrics": "",
    "mvp_features": ""
  }
}"#,
            ),
    )
    .build()
}

// =============================================================================
// PRD generation
// =============================================================================

/// Mode-specific document structure the model must follow
fn mode_structure(mode: DevelopmentMode) -> &'static str {
    match mode {
        DevelopmentMode::Sprint => {
            r#"Produce an AI-DLC Sprint spec: an MVP one developer ships in 48-72 hours.

# [Project Name] - AI-DLC Sprint Spec
## Core Intent (one paragraph)
## Target User (one sentence)
## MVP Features (max 5, each assigned to Day 1-3, each under 8 hours)
## Non-Features (what we are NOT building)
## Success Criteria (demoable in 5 minutes, deployable on Day 3, plus 1-2 specific ones)
## Technical Constraints (single developer, existing libraries, no custom infrastructure)
## Day-by-Day Execution Plan
### Day 1 (Hours 1-16)
### Day 2 (Hours 17-32)
### Day 3 (Hours 33-48)

Be ruthlessly minimal. If a feature takes more than 8 hours it is too big for the MVP."#
        }
        DevelopmentMode::Tdd => {
            r#"Produce a test-driven PRD where quality comes first.

## 1. Test Scenarios
### 1.1 Happy Path Test Cases
### 1.2 Edge Cases
### 1.3 Error Handling Scenarios
### 1.4 Performance Criteria
## 2. Expected Behaviour
### 2.1 Given-When-Then Definitions
### 2.2 Test Data Specification
### 2.3 Mock Data Definitions
### 2.4 API Contract Tests
## 3. Technical Specification
### 3.1 Architecture Requirements (modular, dependency injection, testable)
### 3.2 Code Quality Standards (coverage >= 90%)
### 3.3 Continuous Integration
## 4. Acceptance Criteria
### 4.1 Functional
### 4.2 Performance
### 4.3 Quality

Every feature starts from its test cases; every test must be automatable."#
        }
        DevelopmentMode::Bdd => {
            r#"Produce a behaviour-driven PRD that non-technical stakeholders can read.

## 1. User Story Scenarios
### 1.1 Core User Stories (Feature / As a / I want / So that)
### 1.2 Scenarios (Given / When / Then / And)
### 1.3 User Flows (main, alternative, error)
### 1.4 User Experience Requirements
## 2. Business Value
### 2.1 Why Users Need This
### 2.2 Quantified Business Value
### 2.3 Successful User Behaviour
### 2.4 Competitive Advantage
## 3. User Experience Design
## 4. Cross-Team Collaboration (product, engineering, operations)
## 5. Acceptance Criteria (satisfaction, business metrics, sign-off checklist)

Start every feature from the user's point of view and state its business value."#
        }
        DevelopmentMode::Ddd => {
            r#"Produce a domain-driven PRD for a complex, long-lived system.

## 1. Domain Model
### 1.1 Core Domain Concepts and Business Rules
### 1.2 Bounded Contexts and Context Map
### 1.3 Aggregates, Entities and Value Objects
### 1.4 Domain Events
## 2. Ubiquitous Language
### 2.1 Glossary
### 2.2 Business Rules and Invariants
### 2.3 Domain Event Catalogue
### 2.4 Integration Contracts
## 3. System Architecture (service boundaries, layering, consistency, integration)
## 4. Implementation Strategy (architecture patterns, persistence, performance)
## 5. Rollout and Evolution (modelling workshops, iteration plan, team structure)

Design around the business domain and keep context boundaries explicit."#
        }
    }
}

/// Prompt for a first-draft PRD in the given mode
pub fn prd_prompt(mode: DevelopmentMode, requirements_context: &str, language: &str) -> String {
    PromptTemplates::product_manager(&format!("{} product requirement documents", mode.display_name()))
        .section("Document structure", mode_structure(mode))
        .section("Collected requirements", requirements_context)
        .text("Write the complete PRD in Markdown. Output only the PRD.")
        .language(language)
        .build()
}

/// Prompt asking for three scoped PRD variants and a comparison table
pub fn versions_prompt(initial_prd: &str, language: &str) -> String {
    PromptTemplates::product_manager("scoping products into release versions")
        .objectives(vec![
            "MVP version: ships within 7 days, core features only (20-30%), off-the-shelf tools, manual steps allowed",
            "Standard version: 1 month of development, main features (60-70%), good UX, basic automation",
            "Ideal version: no time or budget limit, complete features, full automation and intelligence",
        ])
        .section("Initial PRD", initial_prd)
        .section(
            "Output format",
            &format!(
                "Write each version as a complete PRD that starts with exactly one of these \
                 top-level headings, in this order:\n\n{}\n{}\n{}\n\n\
                 Each version contains: ## 1. Positioning, ## 2. Feature List (core and excluded), \
                 ## 3. Technical Approach, ## 4. Development Plan, ## 5. Risks and Limitations.\n\n\
                 Finish with the heading `{}` followed by this table:\n\n\
                 | 比較項目 | MVP版 | 標準版 | 理想版 |\n\
                 |---------|-------|--------|--------|\n\
                 | 功能範圍 | ... | ... | ... |\n\
                 | 開發成本 | 低 | 中 | 高 |\n\
                 | 技術難度 | 簡單 | 中等 | 複雜 |\n\
                 | 開發時間 | 7天 | 1個月 | 不限 |\n\
                 | 預期效益 | ... | ... | ... |\n\
                 | 風險等級 | 低 | 中 | 高 |\n\n\
                 Do not use any other top-level (`# `) headings.",
                MVP_HEADING, STANDARD_HEADING, IDEAL_HEADING, COMPARISON_HEADING
            ),
        )
        .language(language)
        .build()
}

// =============================================================================
// Review
// =============================================================================

/// Prompt for the completeness review
pub fn review_prompt(prd: &str, language: &str) -> String {
    PromptTemplates::reviewer("PRD completeness reviews")
        .section("PRD", prd)
        .section(
            "Answer in this Markdown structure",
            "## Completeness Review\n\
             ### 1. Important parts that are missing\n\
             ### 2. Risks not considered\n\
             ### 3. Ambiguous statements\n\
             ### 4. What an engineer still needs before starting\n\
             ### Suggestions",
        )
        .language(language)
        .build()
}

/// Prompt rewriting a PRD so that it addresses `feedback`
pub fn revise_prompt(prd: &str, feedback: &str, language: &str) -> String {
    PromptTemplates::product_manager("revising product requirement documents")
        .objectives(vec![
            "Keep the original Markdown structure and formatting",
            "Change only what the feedback asks for",
            "Add the missing content the feedback names",
        ])
        .section("Original PRD", prd)
        .section("Feedback", feedback)
        .text("Output only the complete revised PRD, with no other commentary.")
        .language(language)
        .build()
}

/// Prompt for the 13-item upgrade checklist
pub fn checklist_prompt(prd: &str, items: &str, language: &str) -> String {
    PromptTemplates::json_only(
        PromptTemplates::reviewer("AI-friendly PRD checklists")
            .section("PRD", prd)
            .section("Check these items", items)
            .section(
                "Answer shape",
                "Group the items under \"basic\", \"ai_friendly\" and \"executable\". Each item is \
                 {\"passed\": true|false, \"suggestion\": \"...\"}; the suggestion is a concrete \
                 improvement when passed is false and an empty string otherwise.",
            )
            .language(language),
    )
    .build()
}

/// Feedback block for an upgrade pass, from numbered suggestions
pub fn upgrade_feedback(suggestions: &[String]) -> String {
    let numbered = suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n");

    PromptBuilder::new()
        .text("Make the PRD AI-friendly: structured, with defined terms, and directly executable.")
        .section("Items to fix", &numbered)
        .build()
}
