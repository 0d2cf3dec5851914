/// Recoverable failures of the storage and sync layers. None of these
/// end a session: callers fall back, warn, or abort a single intent.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Local store could not be read or written (I/O, lock, serialization).
    #[error("Local storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Remote document could not be fetched or replaced (network or HTTP status).
    #[error("Remote unavailable: {0}")]
    RemoteUnavailable(String),

    /// Import document failed to parse or lacked a `tweets` array.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl SyncError {
    /// Text safe to show the user. The technical detail goes to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            SyncError::StorageUnavailable(_) => "Saving to local storage failed",
            SyncError::RemoteUnavailable(_) => "Cloud save failed, your local copy is safe",
            SyncError::InvalidFormat(_) => "Import failed: the file is not a valid backup",
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::StorageUnavailable(err.to_string())
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::StorageUnavailable(err.to_string())
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::RemoteUnavailable(err.to_string())
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
