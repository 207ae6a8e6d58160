//! Versions Command
//!
//! Expand a PRD into MVP, standard and ideal versions.

use std::path::PathBuf;

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, read_text};
use crate::prd::VersionGenerator;
use crate::types::{Result, VersionBundle};

pub async fn run(ctx: CommandContext, prd: PathBuf, output_dir: Option<PathBuf>) -> Result<()> {
    let out = &ctx.output;
    let prd = read_text(&prd)?;

    out.info(&format!("Generating versions with {}", ctx.provider.model()));
    let bundle = VersionGenerator::new(ctx.provider.clone(), ctx.language())
        .generate_versions(&prd)
        .await;

    emit_bundle(out, &bundle, output_dir)
}

/// Write the bundle to `output_dir`, or print it when no directory is given.
pub(crate) fn emit_bundle(
    out: &Output,
    bundle: &VersionBundle,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    if bundle.comparison.is_none() {
        out.warning("No comparison table found");
    }

    match output_dir {
        Some(dir) => {
            for path in bundle.write_to_dir(&dir)? {
                out.success(&format!("Wrote {}", path.display()));
            }
        }
        None => {
            for (_, content) in bundle.variants() {
                out.document(content);
                out.document("");
            }
            if let Some(table) = &bundle.comparison {
                out.document(table);
            }
        }
    }

    Ok(())
}
