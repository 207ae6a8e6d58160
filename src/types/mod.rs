pub mod error;
pub mod requirements;
pub mod transcript;
pub mod versions;

pub use error::{ErrorCategory, ErrorClassifier, LlmError, PrdError, Result};
pub use requirements::{
    CoreProblem, REQUIRED_FIELDS, StructuredRequirements, SuccessDefinition, UserProfile,
    is_complete,
};
pub use transcript::{ConversationTurn, Role, Transcript};
pub use versions::VersionBundle;
