//! Error types for validation failures.
//!
//! This module provides the engine-level [`ErrorRecord`], the aggregate
//! [`ValidationFailure`] and the crate-level [`Error`].

mod failure;
mod record;

pub use failure::{Configuration, Error, PostFormatter, ValidationFailure};
pub use record::{ErrorKind, ErrorRecord};
