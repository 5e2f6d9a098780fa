use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never reached the server or the response never arrived.
    #[error("API request failed: {message}")]
    Network { message: String },

    #[error("API request failed: {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}
