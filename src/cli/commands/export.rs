//! Export Command
//!
//! Combine requirements, the initial PRD and its versions into one
//! Markdown document. Offline.

use std::path::Path;

use crate::cli::ui::Output;
use crate::cli::util::{read_requirements, read_text, write_text};
use crate::prd::combined_document;
use crate::types::{Result, VersionBundle};

pub fn run(
    requirements: &Path,
    prd: &Path,
    versions_dir: &Path,
    output: &Path,
    quiet: bool,
) -> Result<()> {
    let out = Output::new(quiet);

    let requirements = read_requirements(requirements)?;
    let prd = read_text(prd)?;
    let bundle = VersionBundle::read_from_dir(versions_dir)?;

    write_text(output, &combined_document(&requirements, &prd, &bundle))?;
    out.success(&format!("Exported {}", output.display()));
    Ok(())
}
