use std::path::PathBuf;

/// Failures along the scan-to-report path. The first decodable-image check
/// happens before any model call, so `NoValidImages` always means the model
/// was never contacted.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("No valid image files uploaded.")]
    NoValidImages,

    #[error("Diagnosis request failed: {source}")]
    Oracle {
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to render report document: {0}")]
    Render(String),

    #[error("PDF conversion failed for {input}: {source}")]
    Convert {
        input: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),
}
