use crate::error::{ReleaseKitError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Represents the complete configuration for release-kit.
///
/// Holds the default commit ranges, publish behavior, committer identity,
/// and the CI output sink. Everything the calculators need arrives through
/// this struct; nothing is read from ambient globals at computation time.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub refs: RefsConfig,

    #[serde(default)]
    pub publish: PublishConfig,

    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Default commit range for version calculation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RefsConfig {
    #[serde(default = "default_from_ref")]
    pub from: String,

    #[serde(default = "default_to_ref")]
    pub to: String,
}

fn default_from_ref() -> String {
    "origin/rc".to_string()
}

fn default_to_ref() -> String {
    "HEAD".to_string()
}

impl Default for RefsConfig {
    fn default() -> Self {
        RefsConfig {
            from: default_from_ref(),
            to: default_to_ref(),
        }
    }
}

/// Defaults for the publish workflow.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PublishConfig {
    #[serde(default = "default_base_ref")]
    pub base: String,

    #[serde(default = "default_to_ref")]
    pub head: String,

    #[serde(default = "default_release_branch")]
    pub release_branch: String,

    #[serde(default = "default_changelog_file")]
    pub changelog_file: String,

    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
}

fn default_base_ref() -> String {
    "origin/main".to_string()
}

fn default_release_branch() -> String {
    "release".to_string()
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

fn default_manifest_file() -> String {
    "package.json".to_string()
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            base: default_base_ref(),
            head: default_to_ref(),
            release_branch: default_release_branch(),
            changelog_file: default_changelog_file(),
            manifest_file: default_manifest_file(),
        }
    }
}

/// Committer identity used for release commits.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IdentityConfig {
    #[serde(default = "default_identity_name")]
    pub name: String,

    #[serde(default = "default_identity_email")]
    pub email: String,
}

fn default_identity_name() -> String {
    "github-actions[bot]".to_string()
}

fn default_identity_email() -> String {
    "github-actions[bot]@users.noreply.github.com".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        IdentityConfig {
            name: default_identity_name(),
            email: default_identity_email(),
        }
    }
}

/// Where computed versions are echoed for CI consumption.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub sink: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            refs: RefsConfig::default(),
            publish: PublishConfig::default(),
            identity: IdentityConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// The output sink path, falling back to the GITHUB_OUTPUT environment
    /// variable when the config file does not set one.
    pub fn resolve_output_sink(&self) -> Option<PathBuf> {
        self.output
            .sink
            .clone()
            .or_else(|| std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasekit.toml` in current directory
/// 3. `~/.config/.releasekit.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./releasekit.toml").exists() {
        fs::read_to_string("./releasekit.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releasekit.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| ReleaseKitError::config(format!("Cannot parse config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.remote, "origin");
        assert_eq!(config.refs.from, "origin/rc");
        assert_eq!(config.refs.to, "HEAD");
        assert_eq!(config.publish.base, "origin/main");
        assert_eq!(config.publish.release_branch, "release");
        assert_eq!(config.publish.changelog_file, "CHANGELOG.md");
        assert_eq!(config.identity.name, "github-actions[bot]");
        assert!(config.output.sink.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [refs]
            from = "origin/develop"

            [output]
            sink = "/tmp/gh-output"
            "#,
        )
        .unwrap();

        assert_eq!(config.refs.from, "origin/develop");
        // unset fields keep their defaults
        assert_eq!(config.refs.to, "HEAD");
        assert_eq!(config.remote, "origin");
        assert_eq!(config.output.sink, Some(PathBuf::from("/tmp/gh-output")));
    }

    #[test]
    fn test_configured_sink_wins_over_env() {
        let config: Config = toml::from_str(
            r#"
            [output]
            sink = "/tmp/explicit"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.resolve_output_sink(),
            Some(PathBuf::from("/tmp/explicit"))
        );
    }
}
