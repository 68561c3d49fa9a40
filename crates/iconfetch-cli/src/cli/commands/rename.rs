//! `iconfetch rename` – normalize passive skill icon filenames in place.

use anyhow::Result;
use iconfetch_core::config::IconfetchConfig;
use iconfetch_core::rename::{self, NamePattern, RenameEntry, RenameReport, RenameStatus};
use std::io::{self, Write};
use std::path::Path;

pub fn run_rename(cfg: &IconfetchConfig, base_dir: Option<&Path>, dry_run: bool) -> Result<()> {
    let base = base_dir.unwrap_or(cfg.output_dir.as_path());
    let pattern = NamePattern::new(&cfg.image_extension)?;
    let mut out = io::stdout().lock();

    let mut write_err: Option<io::Error> = None;
    let report = rename::normalize_tree(base, &pattern, dry_run, |entry| {
        if write_err.is_none() {
            write_err = print_entry(&mut out, entry, dry_run).err();
        }
    });
    if let Some(e) = write_err {
        return Err(e.into());
    }

    print_summary(&mut out, &report)?;
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_entry(out: &mut impl Write, entry: &RenameEntry, dry_run: bool) -> io::Result<()> {
    match &entry.status {
        RenameStatus::Renamed { to } => {
            let label = if dry_run { "Would rename" } else { "Renamed" };
            writeln!(out, "{}: {} -> {}", label, file_name(&entry.path), file_name(to))
        }
        RenameStatus::Unparsable => writeln!(out, "Could not parse: {}", file_name(&entry.path)),
        RenameStatus::Failed(e) => {
            writeln!(out, "Error renaming {}: {}", entry.path.display(), e)
        }
        RenameStatus::AlreadyCanonical => Ok(()),
    }
}

fn print_summary(out: &mut impl Write, report: &RenameReport) -> io::Result<()> {
    let verb = if report.dry_run { "would be renamed" } else { "renamed" };
    writeln!(
        out,
        "\nSummary: {} files {}, {} files skipped",
        report.renamed(),
        verb,
        report.skipped()
    )?;
    if report.failed() > 0 {
        writeln!(out, "{} files could not be renamed", report.failed())?;
    }
    Ok(())
}
