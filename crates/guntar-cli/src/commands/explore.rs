//! Explore command implementation.

use crate::cli::ExploreArgs;
use crate::config::Config;
use crate::error::add_scan_context;
use crate::output::OutputFormatter;
use crate::tui;
use anyhow::Result;
use anyhow::bail;
use console::Term;
use guntar_core::scan_path;
use guntar_core::selection::Selection;
use std::convert::Infallible;

pub fn execute(args: &ExploreArgs, config: &Config, formatter: &dyn OutputFormatter) -> Result<()> {
    if !Term::stdout().is_term() {
        bail!(
            "explore needs an interactive terminal\n\
             HINT: Use 'guntar list' or 'guntar extract' in scripts and pipes."
        );
    }

    let keys = tui::KeyMap::with_overrides(&config.keys)?;
    let dest = config.output_dir(args.output.as_deref());

    let (tree, report) = add_scan_context(
        scan_path(&args.archive, |_| Ok::<_, Infallible>(Selection::default())),
        &args.archive,
    )?;
    super::warn_skipped(formatter, &report.skipped);
    tracing::info!(nodes = tree.node_count(), "archive loaded");

    let (rows, _) = Term::stdout().size();
    let shell = tui::Shell::new(&args.archive, tree, dest, rows);
    let shell = tui::run(shell, &keys)?;

    if let Some(err) = shell.into_error() {
        return Err(err);
    }
    formatter.format_success("Good bye!");
    Ok(())
}
