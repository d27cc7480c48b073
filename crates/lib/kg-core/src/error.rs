use std::{error::Error, fmt};

#[derive(Debug)]
pub enum ClientError {
    /// The options did not carry a query or any entity ids.
    InvalidRequest(String),
    /// The API answered with a non-success status.
    Upstream {
        status: u16,
        status_text: String,
        body: String,
    },
    Transport(reqwest::Error),
    Decode(serde_json::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(message) => write!(f, "{message}"),
            Self::Upstream {
                status,
                status_text,
                body,
            } => write!(
                f,
                "Knowledge Graph API request failed: {status} {status_text} - {body}"
            ),
            Self::Transport(err) => write!(f, "Knowledge Graph API request failed: {err}"),
            Self::Decode(err) => write!(f, "invalid Knowledge Graph API response: {err}"),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::InvalidRequest(_) | Self::Upstream { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}
