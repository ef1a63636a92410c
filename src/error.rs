use thiserror::Error;

/// Everything that can stop or degrade a monitoring pass. Extraction has no
/// variant here: a field that finds nothing resolves to its sentinel value
/// instead of erroring.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Required settings are absent. Fatal, raised before any I/O.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The case page could not be retrieved within the timeout, or the
    /// server answered with a non-success status.
    #[error("page fetch failed: {0}")]
    Fetch(String),

    /// The notification channel rejected a send or an inbound poll.
    #[error("notification channel error: {0}")]
    Notification(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
