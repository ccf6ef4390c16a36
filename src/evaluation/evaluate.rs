use crate::classifiers::Classifier;
use crate::core::dataset::Dataset;
use crate::core::errors::{DataError, TreeError};
use crate::evaluation::height_aware_evaluator::{AVERAGE_HEIGHT, ERROR, INSTANCES, MAX_HEIGHT};
use crate::evaluation::{
    BasicEstimator, HeightAwareEvaluator, PerformanceEvaluator, PerformanceEvaluatorExt,
};
use serde::Serialize;

/// Error and height statistics of a classifier over a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub average_error: f64,
    pub max_height: usize,
    pub average_height: f64,
    pub instances: usize,
}

impl EvaluationReport {
    /// Reads the report back out of an evaluator's measurements. Missing
    /// metrics read as zero.
    pub fn from_evaluator(evaluator: &dyn PerformanceEvaluator) -> Self {
        let metrics: Vec<f64> = evaluator
            .metrics([ERROR, MAX_HEIGHT, AVERAGE_HEIGHT, INSTANCES])
            .into_iter()
            .map(|(_, value)| value.unwrap_or(0.0))
            .collect();
        Self {
            average_error: metrics[0],
            max_height: metrics[1] as usize,
            average_height: metrics[2],
            instances: metrics[3] as usize,
        }
    }
}

/// Classifies every instance of `dataset` and aggregates zero-one loss and
/// traversal heights.
pub fn evaluate(
    classifier: &dyn Classifier,
    dataset: &Dataset,
) -> Result<EvaluationReport, TreeError> {
    if dataset.is_empty() {
        return Err(DataError::EmptyDataset.into());
    }
    let trained = classifier.header().ok_or(TreeError::NotBuilt)?;
    if !trained.accepts(dataset.header()) {
        let name = format!("relation {}", dataset.header().relation_name());
        return Err(DataError::IncompatibleHeader(name).into());
    }
    let mut evaluator = HeightAwareEvaluator::<BasicEstimator>::new();
    for instance in dataset.iter() {
        let prediction = classifier.classify(instance)?;
        evaluator.add_result(instance, prediction);
    }
    Ok(EvaluationReport::from_evaluator(&evaluator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::{DecisionTree, Prediction, TreeConfig};
    use crate::core::instance_header::InstanceHeader;
    use crate::testing::dummies::{dataset_from_rows, four_row_dataset, header_from};
    use std::sync::Arc;

    #[test]
    fn four_row_scenario() {
        let dataset = four_row_dataset();
        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.train(&dataset).unwrap();
        let report = evaluate(&tree, &dataset).unwrap();
        assert_eq!(
            report,
            EvaluationReport {
                average_error: 0.0,
                max_height: 1,
                average_height: 1.0,
                instances: 4,
            }
        );
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let dataset = four_row_dataset();
        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.train(&dataset).unwrap();
        let header: Arc<InstanceHeader> = Arc::clone(dataset.header());
        let err = evaluate(&tree, &Dataset::new(header)).unwrap_err();
        assert!(matches!(err, TreeError::Data(DataError::EmptyDataset)));
    }

    #[test]
    fn dataset_with_another_schema_is_rejected() {
        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.train(&four_row_dataset()).unwrap();
        // class first, A second: reading by position would score perfectly
        let header = header_from(&[("class", &["pos", "neg"]), ("A", &["x", "y"])], 0);
        let dataset = dataset_from_rows(header, &[&[0, 1], &[1, 0]]);
        let err = evaluate(&tree, &dataset).unwrap_err();
        assert!(matches!(err, TreeError::Data(DataError::IncompatibleHeader(_))));
    }

    #[test]
    fn report_mirrors_the_evaluator() {
        let dataset = four_row_dataset();
        let mut evaluator = HeightAwareEvaluator::<BasicEstimator>::new();
        assert_eq!(EvaluationReport::from_evaluator(&evaluator).instances, 0);
        for (instance, height) in dataset.iter().zip([1, 3, 2, 2]) {
            evaluator.add_result(instance, Prediction { class_index: 0, height });
        }
        assert_eq!(
            EvaluationReport::from_evaluator(&evaluator),
            EvaluationReport {
                average_error: 0.5,
                max_height: 3,
                average_height: 2.0,
                instances: 4,
            }
        );
    }

    #[test]
    fn unbuilt_tree_propagates() {
        let tree = DecisionTree::new(TreeConfig::default());
        let err = evaluate(&tree, &four_row_dataset()).unwrap_err();
        assert!(matches!(err, TreeError::NotBuilt));
    }
}
