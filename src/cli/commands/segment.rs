//! Segment Command
//!
//! Split an existing multi-version reply into its parts. Offline.

use std::path::{Path, PathBuf};

use crate::cli::commands::versions::emit_bundle;
use crate::cli::ui::Output;
use crate::cli::util::read_text;
use crate::prd::segment;
use crate::types::Result;

pub fn run(input: &Path, output_dir: Option<PathBuf>, quiet: bool) -> Result<()> {
    let out = Output::new(quiet);
    let text = read_text(input)?;

    if text.trim().is_empty() {
        out.warning(&format!("{} is empty", input.display()));
    }

    let bundle = segment(&text);
    emit_bundle(&out, &bundle, output_dir)
}
