//! Release publishing workflow
//!
//! Orchestrates changelog generation, the manifest rewrite, and the VCS
//! mutations (commit, tag, push) behind one idempotent entry point.

use crate::changelog::{writer, ChangelogRenderer};
use crate::config::Config;
use crate::error::{ReleaseKitError, Result};
use crate::manifest::ManifestPort;
use crate::ui;
use crate::vcs::VcsPort;
use std::path::Path;

/// Outcome of a publish attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    /// Version bumped, changelog written, tag pushed
    Updated,
    /// Manifest already carried the target version; nothing touched
    Skipped,
}

/// Performs the version bump/publish against the VCS and manifest ports
pub struct ReleasePublisher<'a, V: VcsPort, M: ManifestPort> {
    vcs: &'a V,
    manifest: &'a M,
    config: &'a Config,
}

impl<'a, V: VcsPort, M: ManifestPort> ReleasePublisher<'a, V, M> {
    pub fn new(vcs: &'a V, manifest: &'a M, config: &'a Config) -> Self {
        ReleasePublisher {
            vcs,
            manifest,
            config,
        }
    }

    /// Publish `version`, generating the changelog from `(base, head]`.
    ///
    /// Returns [PublishStatus::Skipped] without any side effect when the
    /// manifest already holds the target version, so re-runs on unchanged
    /// refs are safe. In release mode the manifest and changelog are also
    /// committed and the release branch pushed.
    pub fn publish(
        &self,
        version: &str,
        base: &str,
        head: &str,
        release_mode: bool,
        date: &str,
    ) -> Result<PublishStatus> {
        if version.is_empty() {
            return Err(ReleaseKitError::missing_argument("VERSION is required"));
        }

        let current = format!("v{}", self.manifest.read_version()?);
        if current == version {
            ui::display_warning(&format!(
                "Version {} is already current. Skipping bump.",
                version
            ));
            return Ok(PublishStatus::Skipped);
        }

        ui::display_status(&format!("Generating changelog for {}...", version));
        let renderer = ChangelogRenderer::new(self.vcs, &self.config.remote);
        let section = renderer.generate(version, date, base, head)?;
        writer::write_changelog(Path::new(&self.config.publish.changelog_file), &section)?;

        ui::display_status(&format!("Updating version to {}", version));
        self.manifest.write_version(version)?;

        self.vcs
            .set_identity(&self.config.identity.name, &self.config.identity.email)?;

        if release_mode {
            ui::display_status("Committing updated version and changelog...");
            self.vcs.stage_files(&[
                self.config.publish.changelog_file.as_str(),
                self.config.publish.manifest_file.as_str(),
            ])?;
            self.vcs
                .commit(&format!("bump: update version to {}", version))?;
        }

        ui::display_status(&format!("Creating git tag {}", version));
        self.vcs.create_tag(version)?;
        self.vcs.push_tag(version)?;

        if release_mode {
            ui::display_status(&format!(
                "Pushing commit {} to release branch...",
                version
            ));
            self.vcs.push_branch(&self.config.publish.release_branch)?;
        }

        Ok(PublishStatus::Updated)
    }
}
