/// Failures talking to the remote student store.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("request timed out")]
    Timeout,

    #[error("{}", http_message(*status, detail.as_deref()))]
    Http { status: u16, detail: Option<String> },

    #[error("unexpected response body: {reason}")]
    Decode { reason: String },

    #[error("collection scan stopped: {reason}")]
    Scan { reason: String },
}

fn http_message(status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => detail.to_string(),
        None => format!("HTTP error! status: {status}"),
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SyncError::Timeout
        } else if err.is_decode() {
            SyncError::Decode {
                reason: err.to_string(),
            }
        } else {
            SyncError::Network {
                reason: err.to_string(),
            }
        }
    }
}
