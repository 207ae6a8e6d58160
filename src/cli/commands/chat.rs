//! Chat Command
//!
//! Interactive requirement collection on the terminal.
//!
//! Usage:
//!   prdkit chat [--save FILE] [--resume FILE]
//!
//! `/done` finishes early once enough questions are answered, `/quit`
//! leaves without finishing. The transcript is saved after every turn.

use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::cli::util::CommandContext;
use crate::prd::RequirementCoordinator;
use crate::types::{Result, Role, Transcript};

pub async fn run(ctx: CommandContext, save: Option<PathBuf>, resume: Option<PathBuf>) -> Result<()> {
    let out = &ctx.output;
    let save_path = save.or_else(|| resume.clone());

    let mut coordinator = match &resume {
        Some(path) => {
            let transcript = Transcript::load(path)?;
            out.info(&format!(
                "Resumed {} turns from {}",
                transcript.len(),
                path.display()
            ));
            RequirementCoordinator::with_transcript(ctx.provider.clone(), ctx.language(), transcript)
        }
        None => RequirementCoordinator::new(ctx.provider.clone(), ctx.language()),
    }
    .min_user_answers(ctx.config.generation.min_user_answers);

    if save_path.is_none() {
        out.warning("No --save file given; the transcript will be lost on exit");
    }

    if coordinator.transcript().is_empty() {
        let greeting = coordinator.start().await;
        out.assistant(&greeting);
        autosave(&coordinator, save_path.as_deref());
    } else if let Some(last) = coordinator
        .transcript()
        .turns()
        .iter()
        .rev()
        .find(|t| t.role == Role::Assistant)
    {
        out.assistant(&last.content);
    }

    out.info("Type /done to finish early, /quit to exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !coordinator.is_complete() {
        print!("{}", out.user_prompt());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/done" => match coordinator.mark_complete() {
                Ok(()) => out.success("Requirement collection marked complete"),
                Err(e) => out.warning(&e.to_string()),
            },
            _ => {
                let reply = coordinator.send_message(input).await;
                out.assistant(&reply);
            }
        }

        autosave(&coordinator, save_path.as_deref());
    }

    if coordinator.is_complete() {
        out.success(&format!(
            "Collected {} answers",
            coordinator.transcript().user_turns()
        ));
        if let Some(path) = &save_path {
            out.info(&format!(
                "Next: prdkit extract --transcript {} --output requirements.json",
                path.display()
            ));
        }
    }

    if let Some(path) = &save_path {
        coordinator.transcript().save(path)?;
        out.success(&format!("Transcript saved to {}", path.display()));
    }

    Ok(())
}

fn autosave(coordinator: &RequirementCoordinator, path: Option<&Path>) {
    if let Some(path) = path
        && let Err(e) = coordinator.transcript().save(path)
    {
        warn!("Failed to save transcript to {}: {}", path.display(), e);
    }
}
