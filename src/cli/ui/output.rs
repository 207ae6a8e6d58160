use console::style;

use crate::prd::{DevelopmentMode, ModeAssessment, UpgradeChecklist};

/// Console output. Status lines go to stdout unless `quiet`.
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    pub fn section(&self, message: &str) {
        if !self.quiet {
            println!("\n{}", style(message).bold());
            println!("{}", "─".repeat(40));
        }
    }

    /// Generated content; printed even when quiet
    pub fn document(&self, content: &str) {
        println!("{}", content);
    }

    pub fn assistant(&self, message: &str) {
        println!("\n{} {}\n", style("PM").cyan().bold(), message);
    }

    pub fn user_prompt(&self) -> String {
        format!("{} ", style("you>").green().bold())
    }

    pub fn mode_table(&self, assessments: &[ModeAssessment], recommended: DevelopmentMode) {
        for a in assessments {
            let mark = if a.suitable {
                style("✓").green()
            } else {
                style("·").dim()
            };
            let name = if a.mode == recommended {
                style(a.mode.display_name()).bold().to_string()
            } else {
                a.mode.display_name().to_string()
            };
            println!("  {} {:<12} score {:>3}", mark, name, a.score);
            for reason in &a.reasons {
                println!("      {}", style(reason).dim());
            }
            for suggestion in &a.suggestions {
                println!("      {} {}", style("→").cyan(), suggestion);
            }
        }
    }

    pub fn checklist(&self, checklist: &UpgradeChecklist) {
        for group in &checklist.groups {
            println!("\n{}", style(group.title).bold());
            for item in &group.items {
                if item.passed {
                    println!("  {} {}", style("✓").green(), item.label);
                } else {
                    println!("  {} {}", style("✗").red(), item.label);
                    if !item.suggestion.trim().is_empty() {
                        println!("      {}", style(item.suggestion.trim()).yellow());
                    }
                }
            }
        }
        println!(
            "\n{} {}/{} passed",
            style("Score:").bold(),
            checklist.passed_count(),
            checklist.total()
        );
    }
}
