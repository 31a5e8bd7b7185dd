//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::add_extraction_context;
use crate::error::add_scan_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use guntar_core::DEFAULT_EXTRACT_DIR;
use guntar_core::ExtractOptions;
use guntar_core::NodeId;
use guntar_core::NoopProgress;
use guntar_core::ProgressCallback;
use guntar_core::SimpleTree;
use guntar_core::extract;
use guntar_core::scan_path;
use std::convert::Infallible;
use std::path::PathBuf;

pub fn execute(
    args: &ExtractArgs,
    config: &Config,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let dest = config
        .output_dir(args.output.as_deref())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXTRACT_DIR));

    let (tree, scan_report): (SimpleTree, _) = add_scan_context(
        scan_path(&args.archive, |_| Ok::<(), Infallible>(())),
        &args.archive,
    )?;
    super::warn_skipped(formatter, &scan_report.skipped);

    let skip = |id| is_excluded(&tree, id, &args.ext);

    let mut progress: Box<dyn ProgressCallback> = if show_progress && CliProgress::should_show() {
        Box::new(CliProgress::new("Extracting"))
    } else {
        Box::new(NoopProgress)
    };

    let report = add_extraction_context(
        extract(
            &tree,
            tree.root(),
            Some(&dest),
            skip,
            &ExtractOptions::default(),
            progress.as_mut(),
        ),
        &args.archive,
    )?;
    drop(progress);

    formatter.format_extraction_result(&dest, &report, &scan_report)?;

    Ok(())
}

/// An entry is excluded when `--ext` names it by file name or by path.
fn is_excluded(tree: &SimpleTree, id: NodeId, excluded: &[String]) -> bool {
    if excluded.is_empty() {
        return false;
    }
    let node = &tree[id];
    let hit = excluded.iter().any(|name| {
        let name = name.trim_end_matches('/');
        node.name() == name || node.path().as_str() == name
    });
    if hit {
        tracing::debug!(path = %node.path(), "excluded by --ext");
    }
    hit
}
