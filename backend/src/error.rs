use thiserror::Error;

use crate::config::ConfigError;
use crate::market::yahoo::YahooError;
use crate::notify::line::LineError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("price source setup failed: {0}")]
    PriceSource(#[from] YahooError),

    #[error("notifier setup failed: {0}")]
    Notifier(#[from] LineError),

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}
