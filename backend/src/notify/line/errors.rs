use thiserror::Error;

use scheduler::notify::NotifyError;

#[derive(Error, Debug)]
pub enum LineError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid push request: {0}")]
    InvalidRequest(String),
}

impl From<LineError> for NotifyError {
    fn from(e: LineError) -> Self {
        match e {
            LineError::Http(e) if e.is_builder() => NotifyError::InvalidRequest(e.to_string()),
            LineError::Http(e) => NotifyError::Transport(e.to_string()),
            LineError::InvalidRequest(msg) => NotifyError::InvalidRequest(msg),
        }
    }
}
