use super::{append_version_output, ReleaseCalculator};
use crate::domain::Version;
use crate::error::Result;
use crate::ui;
use crate::vcs::VcsPort;
use regex::Regex;
use std::path::Path;

/// Computes the next beta version, resolving stable-vs-beta precedence.
///
/// An in-flight beta line for a not-yet-released higher version must not be
/// superseded by a lower freshly-computed stable candidate; in that case the
/// existing line continues instead.
pub struct PrereleaseCalculator<'a, V: VcsPort> {
    vcs: &'a V,
    output_sink: Option<&'a Path>,
}

impl<'a, V: VcsPort> PrereleaseCalculator<'a, V> {
    pub fn new(vcs: &'a V) -> Self {
        PrereleaseCalculator {
            vcs,
            output_sink: None,
        }
    }

    /// Echo the computed version to a CI output sink as `version={value}`
    pub fn with_output_sink(mut self, sink: Option<&'a Path>) -> Self {
        self.output_sink = sink;
        self
    }

    /// Next beta version for commits in `(from, to]`.
    pub fn next_beta(&self, from: &str, to: &str) -> Result<Version> {
        ui::display_status(&format!("Calculating prerelease from {} to {}", from, to));

        self.vcs.fetch_tags()?;
        let tags = self.vcs.list_tags(false)?;

        let beta_re = Regex::new(r"^v\d+\.\d+\.\d+-beta\.\d+$").ok();
        let mut betas = Vec::new();
        for tag in tags.iter() {
            if beta_re.as_ref().map_or(false, |re| re.is_match(tag)) {
                betas.push(Version::parse(tag)?);
            }
        }
        betas.sort();
        let latest_beta = betas.last().copied();

        if let Some(latest) = latest_beta {
            ui::display_status(&format!("Latest beta tag: {}", latest));
        }

        // The stable candidate runs without the sink; only the final beta
        // is echoed.
        let stable_candidate = ReleaseCalculator::new(self.vcs).next_stable(from, to)?;

        let next = match latest_beta {
            Some(latest) if latest.base() > stable_candidate => {
                let index = latest.beta.unwrap_or(0) + 1;
                ui::display_status(&format!(
                    "Continuing from higher beta base: {} (next beta.{})",
                    latest.base(),
                    index
                ));
                latest.base().with_beta(index)
            }
            _ => {
                let index = betas
                    .iter()
                    .filter(|beta| beta.base() == stable_candidate)
                    .filter_map(|beta| beta.beta)
                    .max()
                    .map(|n| n + 1)
                    .unwrap_or(0);
                ui::display_status(&format!(
                    "Starting or continuing beta from: {} (next beta.{})",
                    stable_candidate, index
                ));
                stable_candidate.with_beta(index)
            }
        };

        append_version_output(self.output_sink, &next)?;
        Ok(next)
    }
}
