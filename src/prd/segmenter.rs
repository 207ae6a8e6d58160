//! Response segmentation
//!
//! Splits one free-text model reply into the MVP / standard / ideal PRD
//! variants plus an optional comparison table. Pure: no I/O.
//!
//! A top-level heading is a line starting with exactly one `#`, then
//! whitespace, then a non-empty title. Each heading is classified by the
//! first matching rule in [`SLOT_RULES`] (case-insensitive substring match).
//! A section whose heading matches no rule belongs to the most recently
//! classified slot; before any slot is open it is dropped, as is any text
//! before the first heading.

use tracing::debug;

use crate::constants::segmentation::COMPARISON_TABLE_MARKERS;
use crate::types::VersionBundle;

/// Destination of a classified section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Mvp,
    Standard,
    Ideal,
    Comparison,
}

/// Ordered classification rules; the first rule with a matching keyword wins.
pub const SLOT_RULES: [(Slot, &[&str]); 4] = [
    (Slot::Mvp, &["mvp"]),
    (Slot::Standard, &["standard", "標準版"]),
    (Slot::Ideal, &["ideal", "理想版"]),
    (Slot::Comparison, &["comparison", "比較"]),
];

/// Split `response_text` into a [`VersionBundle`].
///
/// Slots without a matching section receive the whole input, so the three
/// variants are never all empty unless the input is.
pub fn segment(response_text: &str) -> VersionBundle {
    if response_text.is_empty() {
        return VersionBundle::default();
    }

    let mut mvp = Vec::new();
    let mut standard = Vec::new();
    let mut ideal = Vec::new();
    let mut comparison = Vec::new();

    let mut current = None;
    for (heading, body) in sections(response_text) {
        let slot = match (classify_heading(heading), current) {
            (Some(slot), _) => slot,
            (None, Some(open)) => {
                debug!("Attaching unclassified section {} to {:?}", heading, open);
                open
            }
            (None, None) => {
                debug!("Dropping section before any version heading: {}", heading);
                continue;
            }
        };
        current = Some(slot);

        let target = match slot {
            Slot::Mvp => &mut mvp,
            Slot::Standard => &mut standard,
            Slot::Ideal => &mut ideal,
            Slot::Comparison => &mut comparison,
        };
        target.push(body);
    }

    let fill = |parts: Vec<String>| {
        if parts.is_empty() {
            response_text.to_string()
        } else {
            parts.join("\n\n")
        }
    };

    let comparison = if comparison.is_empty() {
        find_comparison_table(response_text)
    } else {
        Some(comparison.join("\n\n"))
    };

    VersionBundle {
        mvp: fill(mvp),
        standard: fill(standard),
        ideal: fill(ideal),
        comparison,
    }
}

/// Slot for a heading line, if any rule matches
pub fn classify_heading(heading: &str) -> Option<Slot> {
    let lower = heading.to_lowercase();
    SLOT_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(slot, _)| *slot)
}

/// `# Title` with exactly one hash, whitespace, and a non-empty title
pub fn is_top_level_heading(line: &str) -> bool {
    line.strip_prefix('#')
        .is_some_and(|rest| rest.starts_with(char::is_whitespace) && !rest.trim().is_empty())
}

/// (heading line, section text) pairs in document order
fn sections(text: &str) -> Vec<(&str, String)> {
    let mut out: Vec<(&str, Vec<&str>)> = Vec::new();

    for line in text.lines() {
        if is_top_level_heading(line) {
            out.push((line, vec![line]));
        } else if let Some((_, lines)) = out.last_mut() {
            lines.push(line);
        }
    }

    out.into_iter()
        .map(|(heading, lines)| (heading, lines.join("\n").trim_end().to_string()))
        .collect()
}

/// First comparison table in `text`: the marker row plus every directly
/// following table row.
fn find_comparison_table(text: &str) -> Option<String> {
    let is_row = |line: &str| line.trim_start().starts_with('|');
    let is_marker_row = |line: &str| {
        let lower = line.to_lowercase();
        is_row(line) && COMPARISON_TABLE_MARKERS.iter().any(|m| lower.contains(m))
    };

    let lines: Vec<&str> = text.lines().collect();
    let start = lines.iter().position(|l| is_marker_row(l))?;
    let len = lines[start..].iter().take_while(|l| is_row(l)).count();

    Some(lines[start..start + len].join("\n").trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plan_headings_separate_cleanly() {
        let text = "# MVP Plan\nA\n# Standard Plan\nB\n# Ideal Plan\nC";
        let bundle = segment(text);

        assert_eq!(bundle.mvp, "# MVP Plan\nA");
        assert_eq!(bundle.standard, "# Standard Plan\nB");
        assert_eq!(bundle.ideal, "# Ideal Plan\nC");
        assert_eq!(bundle.comparison, None);
    }

    #[test]
    fn test_chinese_headings_and_comparison_section() {
        let text = "前言\n# MVP版 PRD\n內容一\n\n# 標準版 PRD\n內容二\n# 理想版 PRD\n內容三\n# 版本比較\n| 比較項目 | MVP版 |\n|---|---|\n| 開發時間 | 7天 |\n";
        let bundle = segment(text);

        assert_eq!(bundle.mvp, "# MVP版 PRD\n內容一");
        assert_eq!(bundle.standard, "# 標準版 PRD\n內容二");
        assert_eq!(bundle.ideal, "# 理想版 PRD\n內容三");
        assert_eq!(
            bundle.comparison.as_deref(),
            Some("# 版本比較\n| 比較項目 | MVP版 |\n|---|---|\n| 開發時間 | 7天 |")
        );
    }

    #[test]
    fn test_headingless_input_fills_every_slot() {
        let text = "Just one plan with no headings.";
        let bundle = segment(text);

        assert_eq!(bundle.mvp, text);
        assert_eq!(bundle.standard, text);
        assert_eq!(bundle.ideal, text);
        assert_eq!(bundle.comparison, None);
    }

    #[test]
    fn test_table_without_heading_fills_comparison() {
        let text = "# MVP\nx\n\n| 比較項目 | A | B |\n|---|---|---|\n| 成本 | 低 | 高 |\n\nafter";
        let bundle = segment(text);

        assert_eq!(
            bundle.comparison.as_deref(),
            Some("| 比較項目 | A | B |\n|---|---|---|\n| 成本 | 低 | 高 |")
        );
    }

    #[test]
    fn test_english_table_marker_is_case_insensitive() {
        let text = "  | Comparison Item | MVP |\n  | --- | --- |";
        let bundle = segment(text);
        assert_eq!(bundle.comparison.as_deref(), Some(text));
    }

    #[test]
    fn test_first_rule_wins() {
        assert_eq!(classify_heading("# MVP vs Standard"), Some(Slot::Mvp));
        assert_eq!(classify_heading("# Standard vs Ideal"), Some(Slot::Standard));
        assert_eq!(classify_heading("# Ideal comparison"), Some(Slot::Ideal));
        assert_eq!(classify_heading("# 三版比較"), Some(Slot::Comparison));
        assert_eq!(classify_heading("# Appendix"), None);
    }

    #[test]
    fn test_repeated_slot_sections_are_appended() {
        let text = "# MVP scope\na\n# Standard\ns\n# MVP timeline\nb";
        let bundle = segment(text);
        assert_eq!(bundle.mvp, "# MVP scope\na\n\n# MVP timeline\nb");
        assert_eq!(bundle.standard, "# Standard\ns");
    }

    #[test]
    fn test_unclassified_sections_join_the_open_slot() {
        let text = "# MVP版 PRD\n## 1. 版本定位\nA\n# 功能清單\nlogin, checkout\n# 標準版 PRD\nB\n# 理想版 PRD\nC\n# 總結\nwrap-up";
        let bundle = segment(text);

        assert_eq!(
            bundle.mvp,
            "# MVP版 PRD\n## 1. 版本定位\nA\n\n# 功能清單\nlogin, checkout"
        );
        assert_eq!(bundle.standard, "# 標準版 PRD\nB");
        assert_eq!(bundle.ideal, "# 理想版 PRD\nC\n\n# 總結\nwrap-up");
    }

    #[test]
    fn test_sections_before_first_version_are_dropped() {
        let text = "intro\n# Overview\no\n# Standard\ns\n# Notes\nn";
        let bundle = segment(text);

        assert_eq!(bundle.standard, "# Standard\ns\n\n# Notes\nn");
        assert!(!bundle.standard.contains("intro"));
        assert!(!bundle.standard.contains("Overview"));
        assert_eq!(bundle.mvp, text);
    }

    #[test]
    fn test_heading_rules() {
        assert!(is_top_level_heading("# MVP"));
        assert!(is_top_level_heading("#\tIdeal"));
        assert!(!is_top_level_heading("## MVP"));
        assert!(!is_top_level_heading("#MVP"));
        assert!(!is_top_level_heading("#   "));
        assert!(!is_top_level_heading(" # MVP"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(segment(""), VersionBundle::default());
    }

    proptest! {
        #[test]
        fn prop_never_all_empty(text in "\\PC{1,200}") {
            let bundle = segment(&text);
            prop_assert!(
                !(bundle.mvp.is_empty() && bundle.standard.is_empty() && bundle.ideal.is_empty())
            );
        }

        #[test]
        fn prop_resegmenting_slots_never_panics(
            lines in prop::collection::vec(
                prop_oneof![
                    Just("# MVP".to_string()),
                    Just("# 標準版".to_string()),
                    Just("# Ideal".to_string()),
                    Just("# 比較".to_string()),
                    Just("| 比較項目 | a |".to_string()),
                    "[a-z |#]{0,20}",
                ],
                0..30,
            )
        ) {
            let bundle = segment(&lines.join("\n"));
            for (_, text) in bundle.variants() {
                let _ = segment(text);
            }
            if let Some(table) = &bundle.comparison {
                let _ = segment(table);
            }
        }

        #[test]
        fn prop_headingless_text_is_copied(text in "[a-zA-Z0-9 .,\n]{1,200}") {
            let bundle = segment(&text);
            prop_assert_eq!(&bundle.mvp, &text);
            prop_assert_eq!(&bundle.standard, &text);
            prop_assert_eq!(&bundle.ideal, &text);
        }
    }
}
