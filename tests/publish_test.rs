use release_kit::config::Config;
use release_kit::manifest::{ManifestPort, MemoryManifest};
use release_kit::publisher::{PublishStatus, ReleasePublisher};
use release_kit::vcs::MockVcs;
use tempfile::TempDir;

fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.publish.changelog_file = dir
        .path()
        .join("CHANGELOG.md")
        .to_string_lossy()
        .into_owned();
    config
}

#[test]
fn test_publish_is_idempotent_on_matching_version() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let vcs = MockVcs::new();
    let manifest = MemoryManifest::new("1.2.3");

    let publisher = ReleasePublisher::new(&vcs, &manifest, &config);

    for _ in 0..2 {
        let status = publisher
            .publish("v1.2.3", "origin/main", "HEAD", true, "2026-08-07")
            .unwrap();
        assert_eq!(status, PublishStatus::Skipped);
    }

    assert!(vcs.mutation_log().is_empty());
    assert_eq!(manifest.read_version().unwrap(), "1.2.3");
}

#[test]
fn test_second_publish_of_same_version_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut vcs = MockVcs::new();
    vcs.add_commit("feat: add search", "", "a1");
    let manifest = MemoryManifest::new("1.2.3");

    let publisher = ReleasePublisher::new(&vcs, &manifest, &config);

    let first = publisher
        .publish("v1.3.0", "origin/main", "HEAD", true, "2026-08-07")
        .unwrap();
    assert_eq!(first, PublishStatus::Updated);
    let mutations_after_first = vcs.mutation_log().len();

    let second = publisher
        .publish("v1.3.0", "origin/main", "HEAD", true, "2026-08-07")
        .unwrap();
    assert_eq!(second, PublishStatus::Skipped);
    assert_eq!(vcs.mutation_log().len(), mutations_after_first);
}

#[test]
fn test_release_mode_side_effect_order() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut vcs = MockVcs::new();
    vcs.add_commit("fix: leak", "", "a1");
    let manifest = MemoryManifest::new("1.2.3");

    let publisher = ReleasePublisher::new(&vcs, &manifest, &config);
    publisher
        .publish("v1.2.4", "origin/main", "HEAD", true, "2026-08-07")
        .unwrap();

    let log = vcs.mutation_log();
    let position = |prefix: &str| {
        log.iter()
            .position(|entry| entry.starts_with(prefix))
            .unwrap_or_else(|| panic!("no '{}' in {:?}", prefix, log))
    };

    assert!(position("set_identity") < position("stage_files"));
    assert!(position("stage_files") < position("commit"));
    assert!(position("commit") < position("create_tag"));
    assert!(position("create_tag") < position("push_tag"));
    assert!(position("push_tag") < position("push_branch"));
}
