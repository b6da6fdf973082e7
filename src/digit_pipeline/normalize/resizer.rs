use image::DynamicImage;
use crate::digit_pipeline::common::error::Result;

pub trait Resizer {
    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage>;
}
