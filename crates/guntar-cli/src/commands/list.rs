//! List command implementation

use crate::cli::ListArgs;
use crate::error::add_scan_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use guntar_core::list_archive;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let manifest = add_scan_context(list_archive(&args.archive), &args.archive)?;

    super::warn_skipped(formatter, &manifest.skipped);

    if args.long {
        formatter.format_manifest_long(&manifest, args.human_readable)?;
    } else {
        formatter.format_manifest_short(&manifest)?;
    }

    Ok(())
}
