//! Loading of per-tool SBOMs.

use super::PipelineError;
use crate::error::{ErrorContext, Result as MergeResult, SbomMergeError};
use crate::model::{BomsByTool, SpdxDocument};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One `TOOL=PATH` input: the generating tool and its SBOM file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInput {
    pub tool: String,
    pub path: PathBuf,
}

impl ToolInput {
    #[must_use]
    pub fn new(tool: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            path: path.into(),
        }
    }
}

impl FromStr for ToolInput {
    type Err = PipelineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = |reason: &str| PipelineError::InvalidInput {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (tool, path) = s.split_once('=').ok_or_else(|| invalid("expected TOOL=PATH"))?;
        let tool = tool.trim();
        if tool.is_empty() {
            return Err(invalid("tool name is empty"));
        }
        if path.is_empty() {
            return Err(invalid("path is empty"));
        }
        Ok(Self::new(tool, path))
    }
}

/// Load one tool's SBOM, attaching the tool and path to any error
pub fn load_tool_input(input: &ToolInput) -> MergeResult<SpdxDocument> {
    crate::parsers::parse_document(&input.path).with_context(|| {
        format!(
            "loading {} SBOM from {}",
            input.tool,
            input.path.display()
        )
    })
}

/// Load every input into a tool-keyed mapping, preserving argument order
pub fn load_boms(inputs: &[ToolInput]) -> Result<BomsByTool> {
    let mut boms = BomsByTool::with_capacity(inputs.len());
    let mut sources: Vec<&Path> = Vec::with_capacity(inputs.len());

    for input in inputs {
        if let Some(idx) = boms.get_index_of(&input.tool) {
            return Err(PipelineError::DuplicateTool {
                tool: input.tool.clone(),
                first: sources[idx].display().to_string(),
                second: input.path.display().to_string(),
            }
            .into());
        }

        tracing::info!("Loading {} SBOM: {:?}", input.tool, input.path);
        let doc = load_tool_input(input).map_err(|source| PipelineError::LoadFailed {
            path: input.path.display().to_string(),
            source,
        })?;
        tracing::debug!(
            tool = %input.tool,
            files = doc.files.len(),
            packages = doc.packages.len(),
            "Loaded SBOM"
        );

        boms.insert(input.tool.clone(), doc);
        sources.push(&input.path);
    }

    Ok(boms)
}

/// Absolute form of the scanned directory.
///
/// Existing directories are canonicalized; other paths are joined onto the
/// current directory without touching the filesystem.
pub fn resolve_scan_dir(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        let resolved = std::fs::canonicalize(path).map_err(|e| SbomMergeError::io(path, e))?;
        return Ok(resolved);
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("reading current directory")?;
    Ok(cwd.join(path))
}
