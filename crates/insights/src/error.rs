use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] insights_http::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(err) => err.status(),
            Self::Json(_) => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(err) if err.is_network())
    }
}
