//! Merge command handler.
//!
//! Implements the `merge` subcommand: load every tool's SBOM, merge them and
//! write the consolidated document.

use crate::config::{MergeCommandConfig, Validatable};
use crate::error::SbomMergeError;
use crate::merge::{MergeStats, Merger};
use crate::pipeline::{
    load_boms, render_document, resolve_scan_dir, write_output, OutputTarget, PipelineError,
};
use anyhow::Result;

/// Run the merge command, returning the merge statistics.
#[allow(clippy::needless_pass_by_value)]
pub fn run_merge(config: MergeCommandConfig) -> Result<MergeStats> {
    let quiet = config.quiet;

    let errors = config.app.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(SbomMergeError::config(messages.join("; ")).into());
    }

    let scan_dir = resolve_scan_dir(&config.scan_dir)?;
    let boms = load_boms(&config.inputs)?;

    if !boms.contains_key(&config.app.merge.authoritative_tool) && !quiet {
        tracing::warn!(
            "Authoritative tool '{}' is not among the inputs; first-seen file records win",
            config.app.merge.authoritative_tool
        );
    }

    let merger = Merger::new(config.app.merge_options(&scan_dir));
    let outcome = merger.merge(boms);

    if !quiet {
        let stats = &outcome.stats;
        tracing::info!(
            "Files: {} in, {} merged; packages: {} in, {} merged ({} containers, {} unnamed dropped)",
            stats.input_files,
            stats.merged_files,
            stats.input_packages,
            stats.merged_packages,
            stats.dropped_container_packages,
            stats.dropped_unnamed_packages
        );
    }

    let target = OutputTarget::from_option(config.app.output.file.clone());
    render_document(&outcome.document, config.app.output.pretty)
        .and_then(|rendered| write_output(&rendered, &target, quiet))
        .map_err(|source| PipelineError::OutputFailed { source })?;

    Ok(outcome.stats)
}
