//! Common utilities module
//!
//! This module contains shared utilities used across the digit pipeline.

pub mod error;

pub use error::{InferenceError, Result};
