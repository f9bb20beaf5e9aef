//! vbump - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vbump::manifest::read_manifest;
use vbump::{Config, ConfigOverrides};

/// Bump the build counter and publish the release manifest.
#[derive(Parser, Debug)]
#[command(name = "vbump")]
#[command(about = "Bump the build counter and publish the release manifest")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to the version counter file [env: VBUMP_VERSION_FILE] [default: VERSION]
    #[arg(long, global = true)]
    version_file: Option<PathBuf>,

    /// Path to the manifest file [env: VBUMP_MANIFEST] [default: build/latest.json]
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// Download URL template with a {version} placeholder [env: VBUMP_URL_TEMPLATE]
    #[arg(long, global = true)]
    url_template: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    bump: BumpArgs,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Increment the counter and publish the manifest (default)
    Bump,

    /// Print the current version and the manifest the next bump would write
    Show,
}

#[derive(Args, Debug, Default)]
struct BumpArgs {
    /// Explicit next version (must be greater than the current one)
    #[arg(long = "set-version", global = true)]
    set_version: Option<u64>,

    /// Dry run - print the manifest without writing
    #[arg(long, global = true)]
    dry_run: bool,
}

impl Cli {
    /// The command to run, `bump` when none is given.
    fn resolved_command(&self) -> Result<Command> {
        let command = self.command.unwrap_or(Command::Bump);
        if command == Command::Show && (self.bump.dry_run || self.bump.set_version.is_some()) {
            bail!("--dry-run and --set-version only apply to bump");
        }
        Ok(command)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.resolved_command()?;

    let config = Config::resolve(ConfigOverrides {
        version_file: cli.version_file,
        manifest_path: cli.manifest,
        url_template: cli.url_template,
        set_version: cli.bump.set_version,
    })
    .context("Invalid configuration")?;

    match command {
        Command::Bump if cli.bump.dry_run => run_dry_run(&config),
        Command::Bump => run_bump(&config),
        Command::Show => run_show(&config),
    }
}

fn run_bump(config: &Config) -> Result<()> {
    let outcome = vbump::bump(config).context("Failed to bump version")?;

    println!("Version: {} -> {}", outcome.previous, outcome.current);
    println!(
        "✓ Wrote {} and {}",
        outcome.manifest_path.display(),
        outcome.version_path.display()
    );

    Ok(())
}

fn run_dry_run(config: &Config) -> Result<()> {
    let plan = vbump::plan(config).context("Failed to plan version bump")?;
    let json = plan.manifest.to_json()?;

    println!("Version: {} -> {}", plan.current, plan.next);
    println!("\n--- Dry Run Output ---\n");
    println!("{}: {}", config.manifest_path.display(), json);
    println!("{}: {}", config.version_file.display(), plan.next);
    println!("\nDry run complete. No changes made.");

    Ok(())
}

fn run_show(config: &Config) -> Result<()> {
    let plan = vbump::plan(config).context("Failed to read current version")?;

    println!("Current version: {}", plan.current);

    match read_manifest(&config.manifest_path) {
        Ok(Some(published)) => {
            println!("Published:       {}", published.to_json()?);
            if published.version != plan.current {
                eprintln!(
                    "Warning: {} is at version {} but {} is at {}",
                    config.manifest_path.display(),
                    published.version,
                    config.version_file.display(),
                    plan.current
                );
            }
        }
        Ok(None) => println!("Published:       (none)"),
        Err(e) => eprintln!("Warning: {}", e),
    }

    println!("Next:            {}", plan.manifest.to_json()?);

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins unless `--verbose` is set.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn test_no_arguments_runs_bump() {
        let cli = parse(&["vbump"]);
        assert_eq!(cli.resolved_command().unwrap(), Command::Bump);
        assert!(!cli.bump.dry_run);
        assert_eq!(cli.bump.set_version, None);
    }

    #[test]
    fn test_dry_run_without_subcommand() {
        let cli = parse(&["vbump", "--dry-run"]);
        assert_eq!(cli.resolved_command().unwrap(), Command::Bump);
        assert!(cli.bump.dry_run);
    }

    #[test]
    fn test_dry_run_with_bump_subcommand() {
        for args in [["vbump", "bump", "--dry-run"], ["vbump", "--dry-run", "bump"]] {
            let cli = parse(&args);
            assert_eq!(cli.resolved_command().unwrap(), Command::Bump);
            assert!(cli.bump.dry_run);
        }
    }

    #[test]
    fn test_set_version_without_subcommand() {
        let cli = parse(&["vbump", "--set-version", "10"]);
        assert_eq!(cli.resolved_command().unwrap(), Command::Bump);
        assert_eq!(cli.bump.set_version, Some(10));
    }

    #[test]
    fn test_set_version_rejects_non_integer() {
        assert!(Cli::try_parse_from(["vbump", "--set-version", "abc"]).is_err());
    }

    #[test]
    fn test_show() {
        let cli = parse(&["vbump", "show", "--manifest", "out/latest.json"]);
        assert_eq!(cli.resolved_command().unwrap(), Command::Show);
        assert_eq!(cli.manifest, Some(PathBuf::from("out/latest.json")));
    }

    #[test]
    fn test_show_rejects_bump_flags() {
        assert!(parse(&["vbump", "show", "--dry-run"]).resolved_command().is_err());
        assert!(
            parse(&["vbump", "show", "--set-version", "3"])
                .resolved_command()
                .is_err()
        );
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
