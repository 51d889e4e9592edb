/// Errors surfaced by the presentation and export layer.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("update() called before a successful render(); render the table first")]
    UpdateBeforeRender,

    #[error("Cannot render metrics: {0}")]
    MalformedInput(String),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write report to '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
