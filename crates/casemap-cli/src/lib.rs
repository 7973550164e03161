//! Library side of the `casemap` binary: logging setup and batch generation.

#![deny(unsafe_code)]

pub mod batch;
pub mod logging;
pub mod types;
