pub mod app;
pub mod cli;
pub mod config;
pub mod market;
pub mod notify;
pub mod webhook;

pub mod error;
