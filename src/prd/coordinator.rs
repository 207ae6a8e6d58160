//! Conversational requirement collection
//!
//! Owns the transcript and walks the user through the nine-question
//! questionnaire, one model call per turn.

use tracing::{debug, info, warn};

use crate::ai::SharedProvider;
use crate::constants::collection::{COMPLETION_MARKER, MIN_USER_ANSWERS};
use crate::prd::prompts;
use crate::types::{PrdError, Result, Transcript};

pub struct RequirementCoordinator {
    provider: SharedProvider,
    transcript: Transcript,
    language: String,
    min_user_answers: usize,
}

impl RequirementCoordinator {
    pub fn new(provider: SharedProvider, language: impl Into<String>) -> Self {
        Self::with_transcript(provider, language, Transcript::new())
    }

    /// Resume a saved conversation
    pub fn with_transcript(
        provider: SharedProvider,
        language: impl Into<String>,
        transcript: Transcript,
    ) -> Self {
        Self {
            provider,
            transcript,
            language: language.into(),
            min_user_answers: MIN_USER_ANSWERS,
        }
    }

    pub fn min_user_answers(mut self, n: usize) -> Self {
        self.min_user_answers = n;
        self
    }

    /// Opening greeting and first question. Only the assistant turn is recorded.
    pub async fn start(&mut self) -> String {
        info!("Starting requirement collection (model: {})", self.provider.model());
        let prompt = prompts::coordinator_prompt("", &self.language);
        self.reply(&prompt).await
    }

    /// Record `input`, ask the model for the next turn and record its reply.
    ///
    /// Provider failures are turned into a readable reply instead of an error.
    pub async fn send_message(&mut self, input: &str) -> String {
        self.transcript.push_user(input);
        debug!("User turn {} recorded", self.transcript.user_turns());

        let prompt = prompts::coordinator_prompt(&self.transcript.render(), &self.language);
        let reply = self.reply(&prompt).await;

        if self.transcript.is_collection_complete() {
            info!(
                "Requirement collection complete after {} answers",
                self.transcript.user_turns()
            );
        }
        reply
    }

    /// Finish collection early, skipping the remaining questions.
    pub fn mark_complete(&mut self) -> Result<()> {
        if self.is_complete() {
            return Ok(());
        }

        let answered = self.transcript.user_turns();
        if answered < self.min_user_answers {
            return Err(PrdError::Validation(format!(
                "Answer at least {} questions before finishing ({} so far)",
                self.min_user_answers, answered
            )));
        }

        self.transcript
            .push_assistant(format!("✅ {}！", COMPLETION_MARKER));
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.transcript.is_collection_complete()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }

    async fn reply(&mut self, prompt: &str) -> String {
        let outcome = self.provider.complete(prompt).await.and_then(|response| {
            let text = response.content.trim();
            if text.is_empty() {
                Err(PrdError::LlmApi("empty response".to_string()))
            } else {
                Ok(text.to_string())
            }
        });

        let content = match outcome {
            Ok(text) => text,
            Err(e) => {
                warn!("Coordinator turn failed: {}", e);
                format!(
                    "處理過程中發生錯誤: {}",
                    e.user_message(self.provider.name())
                )
            }
        };
        self.transcript.push_assistant(content.clone());
        content
    }
}
