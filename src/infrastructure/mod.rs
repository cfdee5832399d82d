//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Configuration loading (config)
//! - Demo data (seed)
//! - HTTP server setup (server)
//! - Application state and the versioned store (state)

pub mod config;
pub mod seed;
pub mod server;
pub mod state;

pub use config::Config;
pub use state::{AppState, LibraryStore};
