//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no Axum, no Tokio).
//! Only the snapshot value and domain error types.

pub mod errors;
pub mod snapshot;

pub use errors::{DomainError, Entity};
pub use snapshot::Snapshot;
