//! PRD pipeline
//!
//! Collect requirements in conversation, extract them into a fixed record,
//! draft a PRD in one of four development modes, expand it into scoped
//! versions, and review the result.

pub mod coordinator;
pub mod extractor;
pub mod generator;
pub mod modes;
pub mod prompts;
pub mod review;
pub mod segmenter;
pub mod versions;

pub use coordinator::RequirementCoordinator;
pub use extractor::{Extraction, RequirementExtractor};
pub use generator::{PrdGenerator, requirements_context};
pub use modes::{DevelopmentMode, ModeAssessment, assess_all, recommend};
pub use review::{ChecklistGroup, ChecklistItem, PrdReviewer, UpgradeChecklist};
pub use segmenter::{Slot, segment};
pub use versions::{VersionGenerator, combined_document};
