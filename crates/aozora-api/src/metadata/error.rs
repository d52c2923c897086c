use thiserror::Error;

use crate::fetch::FetchError;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("metadata response parse failed: {0}")]
    Parse(String),

    /// The provider reported a structured error list alongside (or instead
    /// of) data. Surfaced to clients as a 400 by the search endpoint.
    #[error("metadata provider reported errors")]
    Upstream(serde_json::Value),
}
