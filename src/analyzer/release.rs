use super::{append_version_output, detect_bump};
use crate::domain::{classify, ClassifiedCommit, Version};
use crate::error::Result;
use crate::ui;
use crate::vcs::VcsPort;
use regex::Regex;
use std::path::Path;

/// Computes the next stable version from release tags and a commit range
pub struct ReleaseCalculator<'a, V: VcsPort> {
    vcs: &'a V,
    output_sink: Option<&'a Path>,
}

impl<'a, V: VcsPort> ReleaseCalculator<'a, V> {
    pub fn new(vcs: &'a V) -> Self {
        ReleaseCalculator {
            vcs,
            output_sink: None,
        }
    }

    /// Echo the computed version to a CI output sink as `version={value}`
    pub fn with_output_sink(mut self, sink: Option<&'a Path>) -> Self {
        self.output_sink = sink;
        self
    }

    /// Next stable version for commits in `(from, to]`.
    ///
    /// The most recent tag matching `vX.Y.Z` is the base (tags ordered by
    /// creation date), defaulting to `v1.0.0` when none exists; the bump
    /// level comes from classifying the commit range.
    pub fn next_stable(&self, from: &str, to: &str) -> Result<Version> {
        ui::display_status(&format!(
            "Calculating next stable release from {} to {}",
            from, to
        ));

        self.vcs.fetch_tags()?;
        let tags = self.vcs.list_tags(true)?;

        let stable_re = Regex::new(r"^v\d+\.\d+\.\d+$").ok();
        let base = tags
            .iter()
            .find(|tag| {
                stable_re
                    .as_ref()
                    .map_or(false, |re| re.is_match(tag))
            })
            .map(|tag| Version::parse(tag))
            .transpose()?
            .unwrap_or_else(|| Version::new(1, 0, 0));
        ui::display_status(&format!("Latest release tag: {}", base));

        let classified: Vec<ClassifiedCommit> = self
            .vcs
            .log_commits(from, to)?
            .iter()
            .map(|c| classify(&c.subject, &c.body))
            .collect();

        let level = detect_bump(&classified);
        ui::display_status(&format!("Detected semver bump: {}", level));

        let next = base.bump(level);
        append_version_output(self.output_sink, &next)?;

        Ok(next)
    }
}
