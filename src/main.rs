use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

use release_kit::analyzer::{PrereleaseCalculator, ReleaseCalculator};
use release_kit::changelog::{writer, ChangelogRenderer};
use release_kit::config;
use release_kit::manifest::JsonManifest;
use release_kit::publisher::{PublishStatus, ReleasePublisher};
use release_kit::ui;
use release_kit::vcs::Git2Vcs;

#[derive(Parser)]
#[command(
    name = "release-kit",
    about = "Compute semantic versions from git history and publish releases"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the next stable version from the commit range
    NextStableVersion {
        from: Option<String>,
        to: Option<String>,
    },
    /// Compute the next beta version from the commit range
    NextBetaVersion {
        from: Option<String>,
        to: Option<String>,
    },
    /// Render the changelog section for a version
    GenerateChangelog {
        version: String,
        output_file: Option<String>,
        from: Option<String>,
        to: Option<String>,
    },
    /// Bump the manifest, write the changelog, then tag and push
    PublishRelease {
        version: String,
        base: Option<String>,
        head: Option<String>,
        #[arg(default_value = "rc")]
        mode: String,
    },
}

fn main() {
    if let Err(e) = run() {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let config = config::load_config(args.config.as_deref())?;
    let vcs = Git2Vcs::discover(".")?.with_remote(config.remote.clone());

    match args.command {
        Command::NextStableVersion { from, to } => {
            let from = from.unwrap_or_else(|| config.refs.from.clone());
            let to = to.unwrap_or_else(|| config.refs.to.clone());
            let sink = config.resolve_output_sink();

            let version = ReleaseCalculator::new(&vcs)
                .with_output_sink(sink.as_deref())
                .next_stable(&from, &to)?;

            ui::display_success(&format!("Next release version: {}", version));
            println!("VERSION={}", version);
        }
        Command::NextBetaVersion { from, to } => {
            let from = from.unwrap_or_else(|| config.refs.from.clone());
            let to = to.unwrap_or_else(|| config.refs.to.clone());
            let sink = config.resolve_output_sink();

            let version = PrereleaseCalculator::new(&vcs)
                .with_output_sink(sink.as_deref())
                .next_beta(&from, &to)?;

            ui::display_success(&format!("Next beta version: {}", version));
            println!("BETA_VERSION={}", version);
        }
        Command::GenerateChangelog {
            version,
            output_file,
            from,
            to,
        } => {
            let from = from.unwrap_or_else(|| config.refs.from.clone());
            let to = to.unwrap_or_else(|| config.refs.to.clone());

            let renderer = ChangelogRenderer::new(&vcs, &config.remote);
            let section = renderer.generate(&version, &today(), &from, &to)?;

            match output_file {
                Some(path) => {
                    writer::write_changelog(Path::new(&path), &section)?;
                    ui::display_success(&format!("{} updated", path));
                }
                None => println!("{}", section),
            }
        }
        Command::PublishRelease {
            version,
            base,
            head,
            mode,
        } => {
            let base = base.unwrap_or_else(|| config.publish.base.clone());
            let head = head.unwrap_or_else(|| config.publish.head.clone());
            let release_mode = mode == "release";

            let manifest = JsonManifest::new(&config.publish.manifest_file);
            let publisher = ReleasePublisher::new(&vcs, &manifest, &config);

            match publisher.publish(&version, &base, &head, release_mode, &today())? {
                PublishStatus::Updated => {
                    ui::display_success(&format!("Published {}", version));
                }
                PublishStatus::Skipped => {
                    ui::display_status(&format!("Nothing to do for {}", version));
                }
            }
        }
    }

    Ok(())
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
