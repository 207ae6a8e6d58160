//! Multi-version PRD bundle

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::{PrdError, Result};

/// Three scoped PRD variants plus an optional comparison table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionBundle {
    pub mvp: String,
    pub standard: String,
    pub ideal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
}

impl VersionBundle {
    /// Slot names paired with their content, in display order
    pub fn variants(&self) -> [(&'static str, &str); 3] {
        [
            ("mvp", self.mvp.as_str()),
            ("standard", self.standard.as_str()),
            ("ideal", self.ideal.as_str()),
        ]
    }

    /// Write `mvp.md`, `standard.md`, `ideal.md` and, when present,
    /// `comparison.md` into `dir`. Returns the written paths.
    pub fn write_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(4);
        for (name, content) in self.variants() {
            let path = dir.join(format!("{}.md", name));
            std::fs::write(&path, content)?;
            written.push(path);
        }

        if let Some(table) = &self.comparison {
            let path = dir.join("comparison.md");
            std::fs::write(&path, table)?;
            written.push(path);
        }

        Ok(written)
    }

    /// Read a bundle written by [`write_to_dir`](Self::write_to_dir).
    ///
    /// The three variant files are required; `comparison.md` is optional.
    pub fn read_from_dir(dir: &Path) -> Result<Self> {
        let read = |name: &str| -> Result<String> {
            let path = dir.join(format!("{}.md", name));
            std::fs::read_to_string(&path).map_err(|e| {
                PrdError::Validation(format!("Cannot read {}: {}", path.display(), e))
            })
        };

        let comparison_path = dir.join("comparison.md");
        let comparison = if comparison_path.exists() {
            Some(std::fs::read_to_string(&comparison_path)?)
        } else {
            None
        };

        Ok(Self {
            mvp: read("mvp")?,
            standard: read("standard")?,
            ideal: read("ideal")?,
            comparison,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_to_dir_skips_missing_comparison() {
        let dir = TempDir::new().unwrap();
        let bundle = VersionBundle {
            mvp: "# MVP".into(),
            standard: "# Standard".into(),
            ideal: "# Ideal".into(),
            comparison: None,
        };

        let written = bundle.write_to_dir(dir.path()).unwrap();
        assert_eq!(written.len(), 3);
        assert!(!dir.path().join("comparison.md").exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("standard.md")).unwrap(),
            "# Standard"
        );
    }

    #[test]
    fn test_write_to_dir_with_comparison() {
        let dir = TempDir::new().unwrap();
        let bundle = VersionBundle {
            comparison: Some("| 比較項目 | A |".into()),
            ..Default::default()
        };

        let written = bundle.write_to_dir(&dir.path().join("out")).unwrap();
        assert_eq!(written.len(), 4);
        assert!(dir.path().join("out/comparison.md").exists());
    }

    #[test]
    fn test_comparison_omitted_from_json_when_absent() {
        let json = serde_json::to_value(VersionBundle::default()).unwrap();
        assert!(json.get("comparison").is_none());
        assert_eq!(json["mvp"], "");
    }

    #[test]
    fn test_read_from_dir_round_trips_written_bundle() {
        let dir = TempDir::new().unwrap();
        let bundle = VersionBundle {
            mvp: "# MVP".into(),
            standard: "# Standard".into(),
            ideal: "# Ideal".into(),
            comparison: Some("| 比較項目 |".into()),
        };
        bundle.write_to_dir(dir.path()).unwrap();

        assert_eq!(VersionBundle::read_from_dir(dir.path()).unwrap(), bundle);
    }

    #[test]
    fn test_read_from_dir_requires_variants() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("mvp.md"), "# MVP").unwrap();

        let err = VersionBundle::read_from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("standard.md"));
    }
}
