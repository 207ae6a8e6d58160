//! Extract Command
//!
//! Turn a saved chat transcript into a requirements JSON file.

use std::path::PathBuf;

use crate::cli::util::{CommandContext, write_requirements};
use crate::prd::RequirementExtractor;
use crate::types::{Result, Transcript};

pub async fn run(ctx: CommandContext, transcript: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let out = &ctx.output;
    let transcript = Transcript::load(&transcript)?;
    if !transcript.is_collection_complete() {
        out.warning("Transcript has no completion marker; extracting what is there");
    }

    let extraction = RequirementExtractor::new(ctx.provider.clone())
        .extract_detailed(&transcript)
        .await;

    if let Some(failure) = &extraction.failure {
        out.warning(failure);
    }

    let requirements = extraction.requirements;
    let missing = requirements.missing_required();
    if missing.is_empty() {
        out.success(&format!(
            "Extracted {}/9 answers, all required fields present",
            requirements.answered_count()
        ));
    } else {
        out.warning(&format!("Missing required fields: {}", missing.join(", ")));
    }

    match output {
        Some(path) => {
            write_requirements(&path, &requirements)?;
            out.success(&format!("Requirements written to {}", path.display()));
        }
        None => out.document(&serde_json::to_string_pretty(&requirements)?),
    }

    Ok(())
}
