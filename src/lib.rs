pub mod api;
pub mod calcom;
pub mod cli;
pub mod config;
pub mod error;
pub mod functions;
pub mod http;
pub mod models;
pub mod orchestrator;
pub mod session;
pub mod state;
