use release_kit::changelog::{writer, ChangelogRenderer};
use release_kit::vcs::MockVcs;
use std::fs;
use tempfile::TempDir;

fn vcs_with_history() -> MockVcs {
    let mut vcs = MockVcs::new();
    vcs.set_remote_url("git@github.com:acme/widget.git");
    vcs.add_commit("feat: add search", "", "abc1234");
    vcs.add_commit(
        "fix: handle empty query",
        "- guard against empty input\n- add regression test",
        "def5678",
    );
    vcs.add_commit("chore: bump deps", "", "0a1b2c3");
    vcs
}

#[test]
fn test_generated_section_layout() {
    let vcs = vcs_with_history();
    let renderer = ChangelogRenderer::new(&vcs, "origin");
    let section = renderer
        .generate("v1.1.0", "2026-08-07", "origin/rc", "HEAD")
        .unwrap();

    assert!(section.starts_with("## v1.1.0 (2026-08-07)\n"));
    assert!(section
        .contains("- feat: add search [(abc1234)](https://github.com/acme/widget/commit/abc1234)"));
    assert!(section.contains("### ✨ Feature"));
    assert!(section.contains("### 🐛 Bug Fix"));
    assert!(section.contains("### 🗃 Other"));
    // nested body lines sit under their commit bullet
    assert!(section.contains("- fix: handle empty query [(def5678)]"));
    assert!(section.contains("    - guard against empty input"));
    assert!(section.ends_with("\n\n"));
    assert!(!section.contains("\n\n\n"));
}

#[test]
fn test_unrecognized_remote_disables_links() {
    let mut vcs = vcs_with_history();
    vcs.set_remote_url("ssh://gitea.internal/acme/widget.git");

    let renderer = ChangelogRenderer::new(&vcs, "origin");
    let section = renderer
        .generate("v1.1.0", "2026-08-07", "origin/rc", "HEAD")
        .unwrap();

    assert!(section.contains("- feat: add search (abc1234)"));
    assert!(!section.contains("https://"));
}

#[test]
fn test_merge_preserves_prior_sections_and_writes_temp() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("CHANGELOG.md");

    let vcs = vcs_with_history();
    let renderer = ChangelogRenderer::new(&vcs, "origin");

    let first = renderer
        .generate("v1.1.0", "2026-08-01", "origin/rc", "HEAD")
        .unwrap();
    writer::write_changelog(&path, &first).unwrap();

    let second = renderer
        .generate("v1.2.0", "2026-08-07", "origin/rc", "HEAD")
        .unwrap();
    writer::write_changelog(&path, &second).unwrap();

    let merged = fs::read_to_string(&path).unwrap();
    assert!(merged.starts_with("# Changelog\n"));
    let newer_at = merged.find("## v1.2.0 (2026-08-07)").unwrap();
    let older_at = merged.find("## v1.1.0 (2026-08-01)").unwrap();
    assert!(newer_at < older_at, "sections must be reverse-chronological");
    assert_eq!(merged.matches("# Changelog").count(), 1);

    // the sibling temp copy carries only the new section, header stripped
    let temp = fs::read_to_string(dir.path().join("CHANGELOG_temp.md")).unwrap();
    assert!(temp.starts_with("# Changelog\n\n### "));
    assert!(!temp.contains("## v1.2.0"));
    assert!(!temp.contains("## v1.1.0"));
}
