pub mod client;
pub mod errors;
pub mod types;

pub use client::LineClient;
pub use errors::LineError;
