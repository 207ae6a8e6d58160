//! Conversation transcript types.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::collection::COMPLETION_MARKER;
use crate::types::{PrdError, Result};

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            _ => Err(format!(
                "Invalid role: '{}'. Expected 'user' or 'assistant'",
                s
            )),
        }
    }
}

/// A single message in the questionnaire conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered, append-only sequence of conversation turns
///
/// Insertion order is chronological order. Serialized as a plain JSON array
/// of turns so that a chat session can be saved and fed to `extract` later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(ConversationTurn::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(ConversationTurn::assistant(content));
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of answers the user has given so far
    pub fn user_turns(&self) -> usize {
        self.turns.iter().filter(|t| t.role == Role::User).count()
    }

    /// Whether the assistant has announced that collection is finished
    pub fn is_collection_complete(&self) -> bool {
        self.turns
            .iter()
            .any(|t| t.role == Role::Assistant && t.content.contains(COMPLETION_MARKER))
    }

    /// Render as `"<role>: <content>"` lines, turns separated by a blank line.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("{}: {}", t.role, t.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            PrdError::Session(format!(
                "Invalid transcript file {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

impl FromIterator<ConversationTurn> for Transcript {
    fn from_iter<I: IntoIterator<Item = ConversationTurn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_joins_turns_with_blank_line() {
        let mut transcript = Transcript::new();
        transcript.push_assistant("What problem do you want to solve?");
        transcript.push_user("Students lose track of deadlines");

        assert_eq!(
            transcript.render(),
            "assistant: What problem do you want to solve?\n\nuser: Students lose track of deadlines"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(Transcript::new().render(), "");
    }

    #[test]
    fn test_user_turns_and_completion() {
        let mut transcript = Transcript::new();
        transcript.push_assistant("hi");
        transcript.push_user("a");
        transcript.push_user("b");
        assert_eq!(transcript.user_turns(), 2);
        assert!(!transcript.is_collection_complete());

        // marker from the user does not count
        transcript.push_user(COMPLETION_MARKER);
        assert!(!transcript.is_collection_complete());

        transcript.push_assistant(format!("✅ {}！", COMPLETION_MARKER));
        assert!(transcript.is_collection_complete());
    }

    #[test]
    fn test_serializes_as_array() {
        let transcript: Transcript = vec![ConversationTurn::user("hello")].into_iter().collect();
        let json = serde_json::to_string(&transcript).unwrap();
        assert_eq!(json, r#"[{"role":"user","content":"hello"}]"#);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert!("system".parse::<Role>().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sessions/chat.json");

        let mut transcript = Transcript::new();
        transcript.push_user("need a todo app");
        transcript.save(&path).unwrap();

        let loaded = Transcript::load(&path).unwrap();
        assert_eq!(loaded, transcript);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = Transcript::load(&path).unwrap_err();
        assert!(matches!(err, PrdError::Session(_)));
    }
}
