//! Wiring from resolved configuration to runnable components.

use std::sync::Arc;

use scheduler::types::ScheduleMode;
use scheduler::{BootstrapTrigger, Scanner, Scheduler};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::market::yahoo::{YahooClient, client::DEFAULT_BASE_URL};
use crate::notify::line::{LineClient, client::DEFAULT_PUSH_ENDPOINT};
use crate::webhook::WebhookState;

/// Concrete collaborators built from config. Shared by the scanner and the
/// webhook echo path.
pub struct Components {
    pub source: Arc<YahooClient>,
    pub notifier: Arc<LineClient>,
}

impl Components {
    pub fn from_config(cfg: &AppConfig) -> Result<Self, AppError> {
        let source = Arc::new(YahooClient::new(DEFAULT_BASE_URL)?);
        let notifier = Arc::new(LineClient::new(
            DEFAULT_PUSH_ENDPOINT,
            cfg.credentials.channel_token.clone(),
        )?);

        Ok(Self { source, notifier })
    }

    pub fn scanner(&self, cfg: &AppConfig) -> Scanner {
        Scanner::new(
            Arc::new(cfg.scan_config()),
            self.source.clone(),
            self.notifier.clone(),
        )
    }

    pub fn scheduler(&self, cfg: &AppConfig) -> Scheduler {
        Scheduler::new(self.scanner(cfg), cfg.mode)
    }

    /// Webhook state with a continuous scheduler parked until the first
    /// event. The mode flag does not apply here.
    pub fn webhook_state(&self, cfg: &AppConfig) -> Arc<WebhookState> {
        let scheduler = Scheduler::new(self.scanner(cfg), ScheduleMode::Continuous);
        let trigger = BootstrapTrigger::new(scheduler);
        WebhookState::new(trigger, self.notifier.clone())
    }
}
