// src/config/mod.rs

//! Parameter Resolver.
//!
//! - [`env_file`] reads the optional `.env` file and snapshots the process
//!   environment into an immutable [`EnvLayer`].
//! - [`model`] holds the call-site parameters and the resolved result.
//! - [`resolver`] applies the precedence rules.

pub mod env_file;
pub mod model;
pub mod resolver;

pub use env_file::{read_env_file, EnvLayer};
pub use model::{keys, Credentials, ExplicitParams, LaunchTarget, ResolvedConfig};
pub use resolver::resolve;
