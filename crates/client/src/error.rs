use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single store operation.
///
/// These never escape a store: each operation catches its error at the
/// boundary and renders it into the published `error_message`, so the
/// consumer only ever sees the message text.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Local precondition failed: no session token. No network call was made.
    #[error("not authenticated")]
    Unauthenticated,
    /// The server answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Server { status: StatusCode, message: String },
    /// The request never completed, or the body could not be decoded.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}
