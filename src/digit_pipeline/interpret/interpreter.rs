use crate::digit_pipeline::common::error::{InferenceError, Result};

/// Index of the highest score. Ties go to the lowest index.
///
/// NaN scores are skipped; an output made only of NaN yields index 0.
///
/// # Errors
///
/// * `EmptyOutputError` - `output` has no scores
pub fn predicted_class(output: &[f32]) -> Result<usize> {
    if output.is_empty() {
        return Err(InferenceError::EmptyOutputError);
    }

    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in output.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, max)) if score <= max => {}
            _ => best = Some((index, score)),
        }
    }

    Ok(best.map_or(0, |(index, _)| index))
}

/// The raw score at `class_index`.
///
/// The value is returned as produced by the classifier. It is only a
/// probability when the classifier ends in a normalizing layer such as
/// softmax.
pub fn confidence_of(output: &[f32], class_index: usize) -> Result<f32> {
    output
        .get(class_index)
        .copied()
        .ok_or(InferenceError::IndexOutOfRangeError {
            index: class_index,
            len: output.len(),
        })
}

/// Every `(class_index, score)` pair in index order.
pub fn distribution(output: &[f32]) -> Vec<(usize, f32)> {
    output.iter().copied().enumerate().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicted_class_picks_maximum() {
        let output = [0.1, 0.9, 0.05, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(predicted_class(&output).unwrap(), 1);
    }

    #[test]
    fn test_predicted_class_first_maximum_wins() {
        let output = [0.5, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(predicted_class(&output).unwrap(), 0);

        let output = [0.0, 0.2, 0.7, 0.1, 0.7];
        assert_eq!(predicted_class(&output).unwrap(), 2);
    }

    #[test]
    fn test_predicted_class_handles_logits() {
        let output = [-3.5, -0.25, -7.0, -1.0];
        assert_eq!(predicted_class(&output).unwrap(), 1);

        let output = [f32::NEG_INFINITY, f32::NEG_INFINITY];
        assert_eq!(predicted_class(&output).unwrap(), 0);
    }

    #[test]
    fn test_predicted_class_skips_nan() {
        let output = [f32::NAN, 0.2, 0.1];
        assert_eq!(predicted_class(&output).unwrap(), 1);

        let output = [f32::NAN, f32::NAN];
        assert_eq!(predicted_class(&output).unwrap(), 0);
    }

    #[test]
    fn test_predicted_class_empty_output() {
        let result = predicted_class(&[]);
        assert!(matches!(result, Err(InferenceError::EmptyOutputError)));
    }

    #[test]
    fn test_confidence_is_verbatim() {
        let output = [0.125, 2.5, -1.75, 0.3];
        for (index, &score) in output.iter().enumerate() {
            assert_eq!(confidence_of(&output, index).unwrap().to_bits(), score.to_bits());
        }
    }

    #[test]
    fn test_confidence_out_of_range() {
        let output = [0.1, 0.9];
        let result = confidence_of(&output, 2);
        assert!(matches!(
            result,
            Err(InferenceError::IndexOutOfRangeError { index: 2, len: 2 })
        ));

        let result = confidence_of(&[], 0);
        assert!(matches!(result, Err(InferenceError::IndexOutOfRangeError { .. })));
    }

    #[test]
    fn test_distribution_in_index_order() {
        let output = [0.25, 0.0, 0.75];
        assert_eq!(distribution(&output), vec![(0, 0.25), (1, 0.0), (2, 0.75)]);
        assert!(distribution(&[]).is_empty());
    }
}
