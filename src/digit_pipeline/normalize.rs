//! Image normalization module
//!
//! This module converts decoded images into the fixed 28x28 input layout
//! expected by the classifier, behind a swappable resampling step.

mod resizer;
mod area_resizer;
mod filter_resizer;
mod normalizer;
pub mod types;

pub use resizer::Resizer;
pub use area_resizer::AreaAverageResizer;
pub use filter_resizer::{FilterResizer, SmoothFilter};
pub use normalizer::{decode_image, read_image_file, ImageNormalizer};
pub use types::{InputConvention, NormalizedVector, INPUT_HEIGHT, INPUT_LEN, INPUT_WIDTH};
