//! Prediction interpretation module
//!
//! This module derives the predicted class, its confidence and the full
//! score listing from a classifier's raw output, and renders them as text.

mod interpreter;
mod report;
pub mod types;

pub use interpreter::{confidence_of, distribution, predicted_class};
pub use report::format_percentage;
pub use types::Prediction;
