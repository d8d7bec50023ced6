pub mod rci;
pub mod signal;
pub mod source;
pub mod types;
