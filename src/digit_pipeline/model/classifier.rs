use crate::digit_pipeline::common::error::Result;
use crate::digit_pipeline::model::types::OutputVector;
use crate::digit_pipeline::normalize::types::NormalizedVector;

pub trait Classifier {
    fn forward(&self, input: &NormalizedVector) -> Result<OutputVector>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn forward(&self, input: &NormalizedVector) -> Result<OutputVector> {
        (**self).forward(input)
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn forward(&self, input: &NormalizedVector) -> Result<OutputVector> {
        (**self).forward(input)
    }
}
