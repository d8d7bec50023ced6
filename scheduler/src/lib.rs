//! Scan loop, scheduler and start-once bootstrap for the RCI alert engine.

pub mod bootstrap;
pub mod engine;
pub mod notify;
pub mod scan;
pub mod state;
pub mod types;

pub use bootstrap::BootstrapTrigger;
pub use engine::Scheduler;
pub use scan::Scanner;
