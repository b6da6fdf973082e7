use std::fmt;

use crate::digit_pipeline::interpret::types::Prediction;

/// Renders a score as a percentage with two decimals, e.g. `87.43%`.
pub fn format_percentage(score: f32) -> String {
    format!("{:.2}%", score * 100.0)
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Predicted digit: {}", self.class_index)?;
        writeln!(f, "Confidence: {}", format_percentage(self.confidence))?;
        writeln!(f)?;
        writeln!(f, "Probability distribution:")?;
        for (class_index, score) in &self.distribution {
            writeln!(f, "  digit {}: {}", class_index, format_percentage(*score))?;
        }
        Ok(())
    }
}
