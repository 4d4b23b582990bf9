// Library crate for integration tests.
// main.rs has its own mod declarations; this re-exports all modules.

pub mod config;
pub mod discovery;
pub mod error;
pub mod listing;
pub mod network;
pub mod records;
pub mod rollup;
pub mod routes;
pub mod server;
pub mod service;
pub mod settings;
pub mod state;
pub mod stats;
