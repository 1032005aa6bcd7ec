//! Error types shared by the core's persistence-backed stores.

/// Errors from reading or writing a file-backed store (bias weights,
/// event memory).
///
/// Read-side failures are normally degraded to an empty store by the
/// callers; write-side failures surface so the decision cycle can log
/// them and continue.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("store I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The stored content could not be serialized or deserialized.
    #[error("store serialization error: {source}")]
    Serde {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
