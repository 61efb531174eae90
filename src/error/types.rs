use thiserror::Error;

/// Unified result type for the capture panel crate.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors surfaced outside the selection and queue stores.
///
/// Store mutations never fail; invalid input degrades to a no-op. These
/// variants cover loading collaborators and delivering layouts.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("panel sink rejected layout: {0}")]
    Sink(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Problems found while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("region `{0}` listed more than once")]
    DuplicateRegion(String),
    #[error("variant `{0}` listed more than once")]
    DuplicateVariant(String),
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
