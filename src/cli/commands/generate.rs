//! Generate Command
//!
//! Draft a PRD from a requirements file in one development mode.

use std::path::PathBuf;

use crate::cli::util::{CommandContext, read_requirements, write_text};
use crate::prd::{DevelopmentMode, PrdGenerator};
use crate::types::{PrdError, Result};

pub async fn run(
    ctx: CommandContext,
    requirements: PathBuf,
    mode: Option<DevelopmentMode>,
    output: Option<PathBuf>,
) -> Result<()> {
    let out = &ctx.output;
    let requirements = read_requirements(&requirements)?;

    if requirements.answered_count() == 0 {
        return Err(PrdError::Validation(
            "Requirements file has no answers; run chat and extract first".to_string(),
        ));
    }

    let mode = mode.unwrap_or(ctx.config.generation.default_mode);
    out.info(&format!(
        "Generating {} PRD with {}",
        mode.display_name(),
        ctx.provider.model()
    ));

    let prd = PrdGenerator::new(ctx.provider.clone(), ctx.language())
        .generate(&requirements, mode)
        .await?;

    match output {
        Some(path) => {
            write_text(&path, &prd)?;
            out.success(&format!("PRD written to {}", path.display()));
        }
        None => out.document(&prd),
    }

    Ok(())
}
