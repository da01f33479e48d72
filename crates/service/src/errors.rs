use thiserror::Error;

/// Failures of the document store adapter.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// No connection, or the connection failed or timed out.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The store rejected a write.
    #[error("write rejected: {0}")]
    Write(String),
    /// The store answered but the data could not be read.
    #[error("query failed: {0}")]
    Query(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool { matches!(self, Self::Unavailable(_)) }
}

/// A fetched document that could not be turned into its entity.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{collection}[{index}]: {reason}")]
pub struct RecordShapeError {
    pub collection: String,
    pub index: usize,
    pub reason: String,
}

/// Errors a service hands back to its caller. Store failures never surface
/// here; they are absorbed into fallbacks or dropped receipts.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
}
