//! Unified error types for sbom-merge.
//!
//! The merge itself cannot fail; these errors come from loading input
//! documents and from invalid configuration.

use crate::parsers::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sbom-merge operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SbomMergeError {
    /// Errors while loading an input SBOM
    #[error("Failed to load SBOM: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseError,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for sbom-merge operations
pub type Result<T> = std::result::Result<T, SbomMergeError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl SbomMergeError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<ParseError> for SbomMergeError {
    fn from(err: ParseError) -> Self {
        Self::parse(String::new(), err)
    }
}

impl From<std::io::Error> for SbomMergeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained, outermost first, so the final message shows
/// the path through the code:
///
/// ```ignore
/// use sbom_merge::error::ErrorContext;
///
/// let doc = parse_document(&path)
///     .with_context(|| format!("loading syft SBOM from {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<SbomMergeError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: SbomMergeError, new_ctx: &str) -> SbomMergeError {
    match err {
        SbomMergeError::Parse {
            context: existing,
            source,
        } => SbomMergeError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SbomMergeError::Io {
            path,
            message,
            source,
        } => SbomMergeError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        SbomMergeError::Config(msg) => SbomMergeError::Config(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
