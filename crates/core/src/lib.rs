//! Core types and configuration for the tickstamp system.
//!
//! This crate provides shared types used across all other crates:
//! - Calendar, session-window and tick types
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
