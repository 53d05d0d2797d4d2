//! # Veritas Shared Rust Library
//!
//! Shared infrastructure for the Veritas crates:
//! - **error**: Common error type for configuration and I/O at the edges
//! - **tracing**: Logging setup with Veritas segment prefixes
//!
//! ## Usage
//!
//! ```rust,ignore
//! use veritas::error::{Error, Result};
//! use veritas::tracing::prefix;
//! ```

pub mod error;
pub mod tracing;

pub use error::{Error, Result};
