//! In-memory user registry.
//!
//! This module handles:
//! - The user record and its validation rules
//! - The ordered registry and its first-match operations
//! - Parsing external input (path ids, request bodies)

pub mod store;
pub mod user;

pub use store::{UpdateOutcome, UserRegistry};
pub use user::{parse_user, parse_user_id, seed_users, User};
