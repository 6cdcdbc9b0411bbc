//! Core types for fsbatch.
//!
//! This crate provides the fundamental data structures used by the
//! fsbatch operation runner: invocation items and their outcomes, the
//! parameter-resolution trait that decouples the runner from its host,
//! text encodings, and error types.

mod encoding;
mod error;
mod item;
mod params;

pub use encoding::Encoding;
pub use error::{OpError, OpResult};
pub use item::{Item, Outcome};
pub use params::{ParameterSource, Params, StaticParams};
