//! Inbound webhook surface: event intake, echo replies and lazy startup of
//! the background scheduler.

pub mod routes;
pub mod state;
pub mod types;

pub use routes::router;
pub use state::WebhookState;
