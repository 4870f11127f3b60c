//! # Configuration
//!
//! Process-level settings loaded from environment variables.

mod resolver;

pub use resolver::ResolverConfig;
