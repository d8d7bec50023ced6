use thiserror::Error;

use market::source::SourceError;

#[derive(Error, Debug)]
pub enum YahooError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chart api returned status {0}")]
    Status(u16),

    #[error("chart api error {code}: {description}")]
    Api { code: String, description: String },

    #[error("invalid response from chart api: {0}")]
    InvalidResponse(String),
}

impl From<YahooError> for SourceError {
    fn from(e: YahooError) -> Self {
        match e {
            YahooError::Http(e) => SourceError::Transport(e.to_string()),
            YahooError::Status(code) => SourceError::Rejected(format!("status {code}")),
            YahooError::Api { code, description } => {
                SourceError::Rejected(format!("{code}: {description}"))
            }
            YahooError::InvalidResponse(msg) => SourceError::InvalidResponse(msg),
        }
    }
}
