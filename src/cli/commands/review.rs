//! Review and Checklist Commands
//!
//! Usage:
//!   prdkit review --prd FILE [--apply] [--output FILE]
//!   prdkit checklist --prd FILE [--apply] [--output FILE]
//!
//! With `--apply` the revised PRD goes to `--output`, or to stdout.

use std::path::PathBuf;

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, read_text, write_text};
use crate::prd::PrdReviewer;
use crate::types::Result;

pub async fn review(
    ctx: CommandContext,
    prd: PathBuf,
    apply: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let out = &ctx.output;
    let prd = read_text(&prd)?;
    let reviewer = PrdReviewer::new(ctx.provider.clone(), ctx.language());

    let review = reviewer.review(&prd).await?;
    out.section("Completeness review");
    out.document(&review);

    if apply {
        out.info("Revising PRD from the review");
        let revised = reviewer.revise(&prd, &review).await?;
        emit(out, &revised, output)?;
    }

    Ok(())
}

pub async fn checklist(
    ctx: CommandContext,
    prd: PathBuf,
    apply: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let out = &ctx.output;
    let prd = read_text(&prd)?;
    let reviewer = PrdReviewer::new(ctx.provider.clone(), ctx.language());

    let checklist = reviewer.upgrade_checklist(&prd).await?;
    out.section("Upgrade checklist");
    out.checklist(&checklist);

    if apply {
        match reviewer.upgrade(&prd, &checklist).await? {
            Some(upgraded) => emit(out, &upgraded, output)?,
            None => out.success("Every item passed; nothing to upgrade"),
        }
    }

    Ok(())
}

fn emit(out: &Output, prd: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            write_text(&path, prd)?;
            out.success(&format!("Revised PRD written to {}", path.display()));
        }
        None => {
            out.section("Revised PRD");
            out.document(prd);
        }
    }
    Ok(())
}
