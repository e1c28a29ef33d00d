use thiserror::Error;

/// A completed HTTP exchange that came back non-2xx. The raw body is kept
/// so callers can parse the error envelope out of it.
#[derive(Debug, Error)]
#[error("server returned {status}: {body}")]
pub struct HttpResponseError {
    pub status: reqwest::StatusCode,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Response(#[from] HttpResponseError),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl ClientError {
    /// The response error, when the failure was an HTTP status rather
    /// than transport or decoding.
    pub fn response(&self) -> Option<&HttpResponseError> {
        match self {
            ClientError::Response(err) => Some(err),
            _ => None,
        }
    }
}
