//! Structured requirement record
//!
//! Fixed three-stage, nine-field summary of a questionnaire transcript.
//! Every field is always present; unknown answers are the empty string.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stage 0: the core problem
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreProblem {
    pub problem_description: String,
    pub pain_level: String,
    pub consequences: String,
}

/// Stage 1: who the users are
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub target_users: String,
    pub current_solution: String,
    pub willingness_to_pay: String,
}

/// Stage 2: what success looks like
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessDefinition {
    pub success_criteria: String,
    pub measurable_metrics: String,
    pub mvp_features: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredRequirements {
    pub stage_0: CoreProblem,
    pub stage_1: UserProfile,
    pub stage_2: SuccessDefinition,
}

/// Older prompt templates used descriptive stage names
const STAGE_ALIASES: [(&str, &str); 3] = [
    ("stage_0", "core_problem"),
    ("stage_1", "user_profile"),
    ("stage_2", "success_definition"),
];

/// Fields that must be answered before a PRD can be generated
pub const REQUIRED_FIELDS: [&str; 4] = [
    "stage_0.problem_description",
    "stage_1.target_users",
    "stage_2.measurable_metrics",
    "stage_2.mvp_features",
];

impl StructuredRequirements {
    /// Coerce an arbitrary JSON value into the fixed shape.
    ///
    /// Returns `None` when the top-level value is not an object. Extra keys
    /// are ignored; a stage that is not an object becomes an empty stage.
    pub fn from_json_value(value: &Value) -> Option<Self> {
        let root = value.as_object()?;

        let stage = |idx: usize| -> Map<String, Value> {
            let (key, alias) = STAGE_ALIASES[idx];
            match root.get(key).or_else(|| root.get(alias)) {
                Some(Value::Object(map)) => map.clone(),
                Some(other) => {
                    tracing::warn!("Stage '{}' is not an object ({}), using empty stage", key, other);
                    Map::new()
                }
                None => Map::new(),
            }
        };

        let s0 = stage(0);
        let s1 = stage(1);
        let s2 = stage(2);

        Some(Self {
            stage_0: CoreProblem {
                problem_description: field(&s0, "problem_description"),
                pain_level: field(&s0, "pain_level"),
                consequences: field(&s0, "consequences"),
            },
            stage_1: UserProfile {
                target_users: field(&s1, "target_users"),
                current_solution: field(&s1, "current_solution"),
                willingness_to_pay: field(&s1, "willingness_to_pay"),
            },
            stage_2: SuccessDefinition {
                success_criteria: field(&s2, "success_criteria"),
                measurable_metrics: field(&s2, "measurable_metrics"),
                mvp_features: field(&s2, "mvp_features"),
            },
        })
    }

    /// True iff every required field is non-blank after trimming.
    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Dotted names of the required fields that are still blank
    pub fn missing_required(&self) -> Vec<&'static str> {
        let values = [
            &self.stage_0.problem_description,
            &self.stage_1.target_users,
            &self.stage_2.measurable_metrics,
            &self.stage_2.mvp_features,
        ];

        REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(name, _)| *name)
            .collect()
    }

    /// Number of the nine fields with a non-blank answer
    pub fn answered_count(&self) -> usize {
        self.all_text()
            .iter()
            .filter(|v| !v.trim().is_empty())
            .count()
    }

    /// All nine answers in questionnaire order
    pub fn all_text(&self) -> [&str; 9] {
        [
            self.stage_0.problem_description.as_str(),
            self.stage_0.pain_level.as_str(),
            self.stage_0.consequences.as_str(),
            self.stage_1.target_users.as_str(),
            self.stage_1.current_solution.as_str(),
            self.stage_1.willingness_to_pay.as_str(),
            self.stage_2.success_criteria.as_str(),
            self.stage_2.measurable_metrics.as_str(),
            self.stage_2.mvp_features.as_str(),
        ]
    }
}

/// Completeness predicate over the four required fields.
///
/// Pure: no I/O, no side effects.
pub fn is_complete(req: &StructuredRequirements) -> bool {
    req.is_complete()
}

/// Render one field value as text
fn field(stage: &Map<String, Value>, key: &str) -> String {
    stage.get(key).map(value_to_text).unwrap_or_default()
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> StructuredRequirements {
        StructuredRequirements {
            stage_0: CoreProblem {
                problem_description: "missed deadlines".into(),
                ..Default::default()
            },
            stage_1: UserProfile {
                target_users: "students".into(),
                ..Default::default()
            },
            stage_2: SuccessDefinition {
                measurable_metrics: "NPS".into(),
                mvp_features: "login".into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_is_complete() {
        assert!(is_complete(&complete()));
        assert!(!is_complete(&StructuredRequirements::default()));
    }

    #[test]
    fn test_blank_after_trim_is_incomplete() {
        let mut req = complete();
        req.stage_0.problem_description = "  ".into();
        assert!(!is_complete(&req));
        assert_eq!(req.missing_required(), vec!["stage_0.problem_description"]);
    }

    #[test]
    fn test_is_complete_is_deterministic() {
        let req = complete();
        assert_eq!(is_complete(&req), is_complete(&req));
    }

    #[test]
    fn test_missing_required_order() {
        let req = StructuredRequirements::default();
        assert_eq!(req.missing_required(), REQUIRED_FIELDS.to_vec());
    }

    #[test]
    fn test_default_serializes_all_fields() {
        let value = serde_json::to_value(StructuredRequirements::default()).unwrap();
        assert_eq!(value["stage_0"]["pain_level"], "");
        assert_eq!(value["stage_1"]["willingness_to_pay"], "");
        assert_eq!(value["stage_2"]["mvp_features"], "");
    }

    #[test]
    fn test_from_json_value_coerces() {
        let value = json!({
            "stage_0": {"problem_description": "slow checkout", "pain_level": 8, "extra": "ignored"},
            "stage_1": {"target_users": ["shop owners", "cashiers"], "current_solution": null},
            "stage_2": {"mvp_features": "scan, pay", "measurable_metrics": true},
            "notes": "ignored"
        });

        let req = StructuredRequirements::from_json_value(&value).unwrap();
        assert_eq!(req.stage_0.problem_description, "slow checkout");
        assert_eq!(req.stage_0.pain_level, "8");
        assert_eq!(req.stage_0.consequences, "");
        assert_eq!(req.stage_1.target_users, "shop owners, cashiers");
        assert_eq!(req.stage_1.current_solution, "");
        assert_eq!(req.stage_2.measurable_metrics, "true");
    }

    #[test]
    fn test_from_json_value_aliases() {
        let value = json!({
            "core_problem": {"problem_description": "p"},
            "user_profile": {"target_users": "u"},
            "success_definition": {"mvp_features": "m"}
        });
        let req = StructuredRequirements::from_json_value(&value).unwrap();
        assert_eq!(req.stage_0.problem_description, "p");
        assert_eq!(req.stage_1.target_users, "u");
        assert_eq!(req.stage_2.mvp_features, "m");
    }

    #[test]
    fn test_canonical_key_wins_over_alias() {
        let value = json!({
            "stage_0": {"problem_description": "canonical"},
            "core_problem": {"problem_description": "alias"}
        });
        let req = StructuredRequirements::from_json_value(&value).unwrap();
        assert_eq!(req.stage_0.problem_description, "canonical");
    }

    #[test]
    fn test_from_json_value_wrong_shape() {
        assert!(StructuredRequirements::from_json_value(&json!([1, 2])).is_none());
        assert!(StructuredRequirements::from_json_value(&json!("text")).is_none());

        let req = StructuredRequirements::from_json_value(&json!({"stage_0": "oops"})).unwrap();
        assert_eq!(req, StructuredRequirements::default());
    }

    #[test]
    fn test_answered_count() {
        assert_eq!(complete().answered_count(), 4);
        assert_eq!(StructuredRequirements::default().answered_count(), 0);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn completeness_follows_required_fields(
                problem in "[ a-z]{0,6}",
                users in "[ a-z]{0,6}",
                metrics in "[ a-z]{0,6}",
                features in "[ a-z]{0,6}",
                optional in "[ a-z]{0,6}",
            ) {
                let mut req = StructuredRequirements::default();
                req.stage_0.problem_description = problem.clone();
                req.stage_0.consequences = optional.clone();
                req.stage_1.target_users = users.clone();
                req.stage_2.measurable_metrics = metrics.clone();
                req.stage_2.mvp_features = features.clone();

                let expected = [&problem, &users, &metrics, &features]
                    .iter()
                    .all(|v| !v.trim().is_empty());
                prop_assert_eq!(is_complete(&req), expected);
                prop_assert_eq!(is_complete(&req), is_complete(&req.clone()));
            }

            #[test]
            fn any_object_yields_all_three_stages(key in "[a-z_]{1,12}", val in ".{0,12}") {
                let mut map = Map::new();
                map.insert(key, Value::String(val));
                let value = Value::Object(map);
                let req = StructuredRequirements::from_json_value(&value).unwrap();
                let shape = serde_json::to_value(&req).unwrap();
                for stage in ["stage_0", "stage_1", "stage_2"] {
                    prop_assert!(shape[stage].is_object());
                }
            }
        }
    }
}
