use async_trait::async_trait;
use thiserror::Error;

/// Result of one push as reported by the sink (an HTTP status code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub status: u16,
}

impl DeliveryOutcome {
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request could not be built: {0}")]
    InvalidRequest(String),
}

/// Notification sink seam.
///
/// A non-2xx status is an `Ok` outcome; `Err` is reserved for failures
/// that never produced a status.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn push(&self, recipient: &str, text: &str) -> Result<DeliveryOutcome, NotifyError>;
}
