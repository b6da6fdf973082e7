mod types;
mod pipeline;
mod timing;


pub use types::{PipelineConfig, PipelineConfigBuilder, NUM_DIGIT_CLASSES};
pub use pipeline::DigitPipeline;
pub use timing::{PipelineTimings, StepTiming, Timer};
