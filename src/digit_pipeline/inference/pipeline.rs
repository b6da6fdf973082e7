use std::path::Path;

use image::DynamicImage;
use tracing::{debug, info, instrument};

use crate::digit_pipeline::{
    common::error::{InferenceError, Result},
    inference::{PipelineConfig, PipelineTimings, Timer},
    interpret::Prediction,
    model::{Classifier, OutputVector},
    normalize::{decode_image, read_image_file, AreaAverageResizer, ImageNormalizer, Resizer},
};

/// Decode -> normalize -> forward pass -> interpret, for one image at a time.
///
/// The classifier is owned (or borrowed, since `&C` is a classifier too) by
/// the pipeline, so independent pipelines never share state.
pub struct DigitPipeline<R: Resizer, C: Classifier> {
    normalizer: ImageNormalizer<R>,
    classifier: C,
    config: PipelineConfig,
}

impl<C: Classifier> DigitPipeline<AreaAverageResizer, C> {
    pub fn new(classifier: C, config: PipelineConfig) -> Self {
        Self::with_custom(AreaAverageResizer, classifier, config)
    }
}

impl<R: Resizer, C: Classifier> DigitPipeline<R, C> {
    pub fn with_custom(resizer: R, classifier: C, config: PipelineConfig) -> Self {
        Self {
            normalizer: ImageNormalizer::with_resizer(resizer).with_convention(config.convention),
            classifier,
            config,
        }
    }

    fn validate_output(&self, output: &OutputVector) -> Result<()> {
        // An empty output is reported by the interpreter.
        if output.is_empty() {
            return Ok(());
        }

        if let Some(expected) = self.config.expected_classes {
            if output.len() != expected {
                return Err(InferenceError::ModelInvocationError(format!(
                    "classifier returned {} scores, expected {}",
                    output.len(),
                    expected
                )));
            }
        }

        Ok(())
    }

    fn run_stages(&self, image: &DynamicImage, timings: &mut PipelineTimings) -> Result<Prediction> {
        let input = {
            let _span = tracing::info_span!("normalize").entered();
            let timer = Timer::start("normalize");
            let input = self.normalizer.normalize(image)?;
            timings.record(timer);
            input
        };

        let output = {
            let _span = tracing::info_span!("forward").entered();
            let timer = Timer::start("forward");
            let output = self.classifier.forward(&input)?;
            timings.record(timer);
            output
        };

        debug!("Classifier returned {} scores", output.len());
        self.validate_output(&output)?;

        let _span = tracing::info_span!("interpret").entered();
        let timer = Timer::start("interpret");
        let prediction = Prediction::from_output(output.as_slice())?;
        timings.record(timer);

        info!(
            class = prediction.class_index,
            confidence = prediction.confidence,
            "Prediction complete"
        );
        Ok(prediction)
    }

    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn predict(&self, image: &DynamicImage) -> Result<Prediction> {
        self.run_stages(image, &mut PipelineTimings::new())
    }

    pub fn predict_with_timings(&self, image: &DynamicImage) -> Result<(Prediction, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let prediction = self.run_stages(image, &mut timings)?;
        Ok((prediction, timings))
    }

    #[instrument(skip(self, data), fields(input_size = data.len()))]
    pub fn predict_bytes(&self, data: &[u8]) -> Result<Prediction> {
        let image = {
            let _span = tracing::info_span!("decode_image").entered();
            decode_image(data)?
        };
        self.predict(&image)
    }

    #[instrument(skip(self, path))]
    pub fn predict_file<P: AsRef<Path>>(&self, path: P) -> Result<Prediction> {
        self.predict_file_with_timings(path).map(|(prediction, _)| prediction)
    }

    #[instrument(skip(self, path))]
    pub fn predict_file_with_timings<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(Prediction, PipelineTimings)> {
        let path = path.as_ref();
        info!(input = %path.display(), "Classifying file");

        let mut timings = PipelineTimings::new();

        let data = {
            let _span = tracing::info_span!("read_input_file").entered();
            let timer = Timer::start("read_input_file");
            let data = read_image_file(path)?;
            timings.record(timer);
            data
        };

        let image = {
            let _span = tracing::info_span!("decode_image").entered();
            let timer = Timer::start("decode_image");
            let image = decode_image(&data)?;
            timings.record(timer);
            image
        };

        let prediction = self.run_stages(&image, &mut timings)?;
        Ok((prediction, timings))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
