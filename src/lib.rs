pub mod digit_pipeline;
pub mod logger;
