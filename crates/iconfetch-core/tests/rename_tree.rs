//! Integration tests: filename normalization over a directory tree.

use iconfetch_core::rename::{normalize_tree, NamePattern, RenameStatus};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"png").unwrap();
}

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn normalizes_passive_files_and_is_idempotent() {
    let root = tempdir().unwrap();
    let base = root.path().join("skill-icons");
    let calamity = base.join("amon").join("calamity");
    let people = base.join("rafa").join("people_person");

    touch(&calamity.join("BL4_Amon_Tree-Calamity-Row-2-Passive-Some-Skill.png"));
    touch(&calamity.join("BL4_Amon_Tree-Calamity-Row-1-Augment-Foo.png"));
    touch(&calamity.join("BL4_Amon_Tree-Calamity-Row-1-Active-Bar.png"));
    touch(&calamity.join("BL4_Amon_Tree-Calamity-Capstone-Passive-Top.png"));
    touch(&calamity.join("BL4_Amon_Tree-Calamity-Passive-NoRow.png"));
    touch(&people.join("BL4_Rafa_Tree-People_Person-Row-3-PASSIVE-Team--Player.png"));

    let pattern = NamePattern::new(".png").unwrap();
    let mut seen = 0;
    let first = normalize_tree(&base, &pattern, false, |_| seen += 1);

    assert_eq!(seen, 3);
    assert_eq!(first.renamed(), 2);
    assert_eq!(first.unparsable(), 1);
    assert_eq!(first.skipped(), 1);
    assert_eq!(first.failed(), 0);

    assert_eq!(
        names_in(&calamity),
        [
            "BL4_Amon_Tree-Calamity-Capstone-Passive-Top.png",
            "BL4_Amon_Tree-Calamity-Passive-NoRow.png",
            "BL4_Amon_Tree-Calamity-Row-1-Active-Bar.png",
            "BL4_Amon_Tree-Calamity-Row-1-Augment-Foo.png",
            "Row_2-Passive-Some_Skill.png",
        ]
    );
    assert_eq!(names_in(&people), ["Row_3-Passive-Team_Player.png"]);

    let second = normalize_tree(&base, &pattern, false, |_| {});
    assert_eq!(second.renamed(), 0);
    assert_eq!(second.failed(), 0);
    assert_eq!(second.skipped(), second.entries.len());
    assert_eq!(names_in(&people), ["Row_3-Passive-Team_Player.png"]);
}

#[test]
fn dry_run_reports_without_renaming() {
    let root = tempdir().unwrap();
    let file = root.path().join("h").join("BL4_Harlowe_Tree-Row-1-Passive-Zap.png");
    touch(&file);

    let pattern = NamePattern::new(".png").unwrap();
    let report = normalize_tree(root.path(), &pattern, true, |_| {});

    assert!(report.dry_run);
    assert_eq!(report.renamed(), 1);
    assert_eq!(
        report.entries[0].status,
        RenameStatus::Renamed {
            to: root.path().join("h").join("Row_1-Passive-Zap.png")
        }
    );
    assert!(file.exists());
}

#[test]
fn missing_base_dir_is_empty_report() {
    let root = tempdir().unwrap();
    let pattern = NamePattern::new(".png").unwrap();
    let report = normalize_tree(&root.path().join("nope"), &pattern, false, |_| {});
    assert!(report.entries.is_empty());
    assert_eq!(report.renamed(), 0);
}
