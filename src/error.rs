//! Structured error types for the pipeline.

use thiserror::Error;

/// Unified error type for every pipeline stage.
///
/// Each variant corresponds to one failure class; any of them aborts the
/// whole run. Cleanup warnings are logged and never become errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A remote input source could not be materialized.
    #[error("download failed: {0}")]
    Download(String),

    /// A gene-annotation record could not be parsed.
    #[error("annotation parse error: {0}")]
    AnnotationParse(String),

    /// An assembly FASTA was empty, malformed or self-contradictory.
    #[error("sequence load error: {0}")]
    SequenceLoad(String),

    /// A requested interval falls outside its contig.
    #[error("coordinate out of range: {0}")]
    OutOfRange(String),

    /// An annotation yielded no coding sequences at all.
    #[error("no coding sequences extracted from {0} annotation")]
    NoCodingSequence(String),

    /// The external alignment engine could not be run, or exited nonzero.
    #[error("alignment engine failed (exit code {code:?}): {stderr}")]
    AlignmentEngine {
        code:   Option<i32>,
        stderr: String,
    },

    /// The engine's result output could not be decoded.
    #[error("alignment result parse error: {0}")]
    ResultParse(String),

    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PipelineError>;
