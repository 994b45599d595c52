//! Common types for the Atlassian OAuth workspace

pub mod env;
mod error;
mod secret;

pub use env::{Env, ProcessEnv};
pub use error::{Error, Result};
pub use secret::Secret;
