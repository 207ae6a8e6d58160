//! Suggest-mode Command
//!
//! Score the requirements against every development mode. Offline.

use std::path::Path;

use crate::cli::ui::Output;
use crate::cli::util::read_requirements;
use crate::prd::{assess_all, recommend};
use crate::types::Result;

pub fn run(path: &Path, quiet: bool) -> Result<()> {
    let out = Output::new(quiet);
    let requirements = read_requirements(path)?;

    let assessments = assess_all(&requirements);
    let best = recommend(&requirements);

    out.section("Development mode fit");
    out.mode_table(&assessments, best.mode);

    out.success(&format!(
        "Recommended: {} ({})",
        best.mode.display_name(),
        best.mode.description()
    ));
    out.info(&format!(
        "Next: prdkit generate --requirements {} --mode {}",
        path.display(),
        best.mode
    ));
    Ok(())
}
