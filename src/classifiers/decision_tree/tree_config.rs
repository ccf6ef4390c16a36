use crate::classifiers::decision_tree::chi_square::SignificanceLevel;
use crate::classifiers::decision_tree::split_criteria::ImpurityMeasure;
use crate::core::attributes::NominalAttribute;
use crate::core::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Build-time options of a decision tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub impurity: ImpurityMeasure,
    pub significance: SignificanceLevel,
    /// Label of the class counted as positive. Defaults to the first value of
    /// the class attribute.
    pub positive_class: Option<String>,
}

impl TreeConfig {
    pub fn new(impurity: ImpurityMeasure, significance: SignificanceLevel) -> Self {
        Self {
            impurity,
            significance,
            positive_class: None,
        }
    }

    pub fn with_impurity(mut self, impurity: ImpurityMeasure) -> Self {
        self.impurity = impurity;
        self
    }

    pub fn with_significance(mut self, significance: SignificanceLevel) -> Self {
        self.significance = significance;
        self
    }

    pub fn with_positive_class(mut self, label: impl Into<String>) -> Self {
        self.positive_class = Some(label.into());
        self
    }

    /// Domain index of the positive class within `class_attribute`.
    pub fn resolve_positive_class(
        &self,
        class_attribute: &NominalAttribute,
    ) -> Result<usize, ConfigError> {
        match &self.positive_class {
            None => Ok(0),
            Some(label) => class_attribute.index_of_value(label).ok_or_else(|| {
                ConfigError::UnknownPositiveClass {
                    label: label.clone(),
                    attribute: class_attribute.name().to_string(),
                }
            }),
        }
    }
}
