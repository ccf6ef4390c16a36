use crate::core::dataset::Dataset;
use crate::core::errors::TreeError;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use serde::Serialize;

/// A predicted class together with the number of edges walked to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub class_index: usize,
    pub height: usize,
}

pub trait Classifier {
    fn train(&mut self, dataset: &Dataset) -> Result<(), TreeError>;

    fn classify(&self, instance: &dyn Instance) -> Result<Prediction, TreeError>;

    /// Schema seen in training; `None` until trained.
    fn header(&self) -> Option<&InstanceHeader>;

    /// One vote for the predicted class.
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Result<Vec<f64>, TreeError> {
        let prediction = self.classify(instance)?;
        let mut votes = vec![0.0; instance.number_of_classes().max(prediction.class_index + 1)];
        votes[prediction.class_index] = 1.0;
        Ok(votes)
    }
}
