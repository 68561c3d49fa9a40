//! Filename normalizer for downloaded passive skill icons.
//!
//! `BL4_Amon_Tree-Calamity-Row-2-Passive-Some-Skill.png` becomes
//! `Row_2-Passive-Some_Skill.png` in the same directory. Canonical names no
//! longer contain `Row-<n>-`, so a second pass finds nothing to rename.

use crate::text::title_case;
use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Fields parsed out of a downloaded icon's filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRenameRecord {
    /// Row digits, kept as written.
    pub row_number: String,
    /// `Passive` or `Active`.
    pub skill_type: String,
    /// Name with `-` turned into `_`, doubled `_` collapsed, outer `_` trimmed.
    pub skill_name: String,
}

impl FileRenameRecord {
    /// `Row_<n>-<Type>-<name><extension>`.
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "Row_{}-{}-{}{}",
            self.row_number, self.skill_type, self.skill_name, extension
        )
    }
}

fn canonical_skill_name(raw: &str) -> String {
    raw.replace('-', "_")
        .replace("__", "_")
        .trim_matches('_')
        .to_string()
}

/// Candidate filter and parser for one image extension.
#[derive(Debug, Clone)]
pub struct NamePattern {
    extension: String,
    row: Regex,
    skill_type: Regex,
    skill_name: Regex,
}

impl NamePattern {
    /// Builds the pattern for files ending in `extension` (e.g. ".png").
    pub fn new(extension: &str) -> Result<Self> {
        let skill_name = format!(r"-(?i:passive|active)-(.+?){}$", regex::escape(extension));
        Ok(Self {
            extension: extension.to_string(),
            row: Regex::new(r"Row-(\d+)-")?,
            skill_type: Regex::new(r"-((?i:passive|active))-")?,
            skill_name: Regex::new(&skill_name)
                .with_context(|| format!("bad image extension: {extension}"))?,
        })
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Passive icons only: right extension, "passive" in any case, no Augment/Capstone.
    pub fn is_candidate(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.extension)
            && file_name.to_lowercase().contains("passive")
            && !file_name.contains("Augment")
            && !file_name.contains("Capstone")
    }

    /// Parses `file_name`; `None` if any required segment is missing.
    pub fn parse(&self, file_name: &str) -> Option<FileRenameRecord> {
        let row_number = self.row.captures(file_name)?.get(1)?.as_str().to_string();
        let skill_type = title_case(self.skill_type.captures(file_name)?.get(1)?.as_str());
        let raw_name = self.skill_name.captures(file_name)?.get(1)?.as_str();
        let skill_name = canonical_skill_name(raw_name);
        if skill_name.is_empty() {
            return None;
        }
        Some(FileRenameRecord {
            row_number,
            skill_type,
            skill_name,
        })
    }

    /// Canonical name for `file_name`, if it parses.
    pub fn canonical_name(&self, file_name: &str) -> Option<String> {
        self.parse(file_name).map(|r| r.file_name(&self.extension))
    }
}

/// What happened to one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameStatus {
    /// Renamed (or, in a dry run, would be renamed) to `to`.
    Renamed { to: PathBuf },
    AlreadyCanonical,
    Unparsable,
    /// Filesystem rename failed.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct RenameEntry {
    pub path: PathBuf,
    pub status: RenameStatus,
}

/// Per-file results of one normalization pass.
#[derive(Debug, Clone, Default)]
pub struct RenameReport {
    pub dry_run: bool,
    pub entries: Vec<RenameEntry>,
}

impl RenameReport {
    fn count(&self, f: impl Fn(&RenameStatus) -> bool) -> usize {
        self.entries.iter().filter(|e| f(&e.status)).count()
    }

    pub fn renamed(&self) -> usize {
        self.count(|s| matches!(s, RenameStatus::Renamed { .. }))
    }

    pub fn already_canonical(&self) -> usize {
        self.count(|s| *s == RenameStatus::AlreadyCanonical)
    }

    pub fn unparsable(&self) -> usize {
        self.count(|s| *s == RenameStatus::Unparsable)
    }

    /// Already canonical plus unparsable.
    pub fn skipped(&self) -> usize {
        self.already_canonical() + self.unparsable()
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, RenameStatus::Failed(_)))
    }
}

/// Walks `base` and returns every candidate file, sorted by path within each directory.
///
/// The list is a snapshot taken before any rename; unreadable entries are logged and skipped.
pub fn collect_candidates(base: &Path, pattern: &NamePattern) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for entry in WalkDir::new(base).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(path = %base.display(), "walk error: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if pattern.is_candidate(name) {
            out.push(entry.into_path());
        }
    }
    out
}

/// Normalizes one candidate file.
pub fn rename_one(path: &Path, pattern: &NamePattern, dry_run: bool) -> RenameStatus {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return RenameStatus::Unparsable;
    };
    let Some(new_name) = pattern.canonical_name(name) else {
        tracing::debug!(path = %path.display(), "could not parse filename");
        return RenameStatus::Unparsable;
    };
    if new_name == name {
        return RenameStatus::AlreadyCanonical;
    }

    let to = path.with_file_name(&new_name);
    if dry_run {
        return RenameStatus::Renamed { to };
    }
    if to.exists() {
        tracing::warn!(path = %to.display(), "rename target exists and will be replaced");
    }
    match fs::rename(path, &to) {
        Ok(()) => {
            tracing::debug!(from = %path.display(), to = %to.display(), "renamed");
            RenameStatus::Renamed { to }
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "rename failed: {}", e);
            RenameStatus::Failed(e.to_string())
        }
    }
}

/// Normalizes every candidate under `base`, reporting each file to `on_entry`.
/// Errors on individual files never abort the pass.
pub fn normalize_tree<F>(
    base: &Path,
    pattern: &NamePattern,
    dry_run: bool,
    mut on_entry: F,
) -> RenameReport
where
    F: FnMut(&RenameEntry),
{
    let candidates = collect_candidates(base, pattern);
    tracing::info!(
        base = %base.display(),
        candidates = candidates.len(),
        dry_run,
        "normalizing filenames"
    );

    let mut report = RenameReport {
        dry_run,
        entries: Vec::with_capacity(candidates.len()),
    };
    for path in candidates {
        let status = rename_one(&path, pattern, dry_run);
        let entry = RenameEntry { path, status };
        on_entry(&entry);
        report.entries.push(entry);
    }
    report
}
