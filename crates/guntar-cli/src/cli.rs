//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "guntar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (default: ~/.config/guntar/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List archive contents in archive order
    List(ListArgs),
    /// Extract archive contents
    Extract(ExtractArgs),
    /// Browse the archive interactively
    Explore(ExploreArgs),
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show mode, size, modification time and link targets
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: ./extract)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Leave out entries with this name or path (can be repeated)
    #[arg(short, long = "ext", value_name = "NAME")]
    pub ext: Vec<String>,
}

#[derive(clap::Args)]
pub struct ExploreArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory for extraction (default: ./extract)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Write logs to this file while the browser is open
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_extract_repeated_ext() {
        let cli = Cli::parse_from([
            "guntar", "extract", "a.tar", "-o", "out", "-e", "x.txt", "--ext", "dir/y",
        ]);
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert_eq!(args.ext, vec!["x.txt", "dir/y"]);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["guntar", "-q", "-v", "list", "a.tar"]).is_err());
    }
}
