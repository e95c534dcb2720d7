//! Build pipeline error taxonomy

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    /// Request rejected before any workspace is created.
    #[error("invalid build request: {0}")]
    Validation(String),

    /// The uploaded site archive could not be parsed or extracted.
    #[error("corrupt site archive: {0}")]
    ArchiveCorrupt(String),

    /// The uploaded site archive would expand past the uncompressed size bound.
    #[error("site archive exceeds the {limit} byte uncompressed limit")]
    ArchiveTooLarge { limit: u64 },

    /// I/O failure while assembling the workspace or writing the final archive.
    #[error("packaging failed: {context}")]
    Packaging {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The remote CI system rejected the dispatch or was unreachable.
    /// A produced artifact stays downloadable regardless.
    #[error("workflow dispatch failed: {0}")]
    Dispatch(String),
}

impl BuildError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn packaging(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Packaging {
            context: context.into(),
            source,
        }
    }
}
