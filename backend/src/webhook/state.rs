use std::sync::Arc;

use scheduler::BootstrapTrigger;
use scheduler::notify::Notifier;

/// Shared state handed to every handler via `axum::extract::State`.
pub struct WebhookState {
    pub trigger: BootstrapTrigger,
    pub notifier: Arc<dyn Notifier>,
}

impl WebhookState {
    pub fn new(trigger: BootstrapTrigger, notifier: Arc<dyn Notifier>) -> Arc<Self> {
        Arc::new(Self { trigger, notifier })
    }
}
