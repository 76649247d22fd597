//! In-memory user registry served over a small REST API.
//!
//! Five endpoints list, fetch, add, replace and delete user records held
//! in a single ordered sequence. Lookups are first-match linear scans, so
//! duplicate ids always resolve to the oldest record.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`registry`]: The user record and the ordered registry
//! - [`api`]: HTTP handlers, routes and OpenAPI documentation
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod registry;
pub mod utils;

pub use config::Config;
pub use error::{RegistryError, Result, ServiceError};
pub use registry::{UpdateOutcome, User, UserRegistry};
