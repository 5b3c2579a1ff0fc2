use shared::domain::ArticleId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(
        "server responded with status {status}: {}",
        .message.as_deref().unwrap_or("<no message>")
    )]
    Status { status: u16, message: Option<String> },
    #[error("invalid base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("session store error: {0}")]
    Session(#[from] std::io::Error),
    #[error("{0}")]
    Validation(&'static str),
    #[error("article {0} is not loaded")]
    UnknownArticle(ArticleId),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Message carried in the server's error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
