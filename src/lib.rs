// Public API for integration tests and bridge clients

pub mod api;
pub mod broadcast;
pub mod command;
pub mod config;
pub mod error;
pub mod protocol;
pub mod render;
pub mod server;
pub mod similarity;
pub mod state;
pub mod types;
pub mod ws;
