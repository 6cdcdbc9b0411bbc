//! Batch filesystem operation engine for fsbatch.
//!
//! This crate provides the batch runner: it iterates over invocation
//! items, resolves each item's operation and parameters from an injected
//! [`fsbatch_core::ParameterSource`], dispatches to one of fourteen
//! filesystem operations, and accumulates one outcome per item in input
//! order. Failures either abort the batch (strict mode) or are recorded
//! alongside the item's original record (tolerant mode).

mod archive;
mod content;
mod copy;
mod create;
mod inspect;
mod move_op;
mod operation;
mod permissions;
mod remove;
mod request;
mod runner;

pub use operation::Operation;
pub use request::Request;
pub use runner::BatchRunner;
