pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod state;
pub mod telemetry;
