use crate::classifiers::decision_tree::{ImpurityMeasure, SignificanceLevel};
use crate::classifiers::{DecisionTree, TreeBuilder, TreeConfig};
use crate::core::dataset::Dataset;
use crate::core::errors::TreeError;
use crate::evaluation::{EvaluationReport, evaluate};
use chrono::Utc;
use log::info;
use serde::Serialize;
use std::fmt;
use strum::IntoEnumIterator;

/// Validation errors of the two unpruned trees used to pick the impurity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpurityComparison {
    pub entropy_validation_error: f64,
    pub gini_validation_error: f64,
}

impl ImpurityComparison {
    /// Gini only when it does strictly better.
    pub fn winner(&self) -> ImpurityMeasure {
        if self.entropy_validation_error > self.gini_validation_error {
            ImpurityMeasure::Gini
        } else {
            ImpurityMeasure::Entropy
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelResult {
    pub significance: SignificanceLevel,
    pub train_error: f64,
    pub validation: EvaluationReport,
    pub node_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub timestamp: String,
    pub relation: String,
    pub train_instances: usize,
    pub validation_instances: usize,
    pub impurity_comparison: Option<ImpurityComparison>,
    pub impurity: ImpurityMeasure,
    pub levels: Vec<LevelResult>,
    pub best_significance: SignificanceLevel,
    pub test: Option<EvaluationReport>,
}

impl SweepReport {
    pub fn best_level(&self) -> Option<&LevelResult> {
        self.levels
            .iter()
            .find(|l| l.significance == self.best_significance)
    }
}

pub struct SweepOutcome {
    pub report: SweepReport,
    pub best_tree: DecisionTree,
}

/// Chooses an impurity on validation data, then grows one tree per
/// significance level and keeps the level with the lowest validation error.
#[derive(Debug, Clone, Default)]
pub struct PruningSweep {
    positive_class: Option<String>,
    impurity: Option<ImpurityMeasure>,
}

impl PruningSweep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_positive_class(mut self, label: Option<String>) -> Self {
        self.positive_class = label;
        self
    }

    /// Skips the entropy/Gini comparison.
    pub fn with_impurity(mut self, impurity: Option<ImpurityMeasure>) -> Self {
        self.impurity = impurity;
        self
    }

    fn config(&self, impurity: ImpurityMeasure, significance: SignificanceLevel) -> TreeConfig {
        TreeConfig {
            impurity,
            significance,
            positive_class: self.positive_class.clone(),
        }
    }

    fn grow(
        &self,
        train: &Dataset,
        impurity: ImpurityMeasure,
        significance: SignificanceLevel,
    ) -> Result<DecisionTree, TreeError> {
        TreeBuilder::new(self.config(impurity, significance)).build(train)
    }

    pub fn compare_impurities(
        &self,
        train: &Dataset,
        validation: &Dataset,
    ) -> Result<ImpurityComparison, TreeError> {
        let entropy = self.grow(train, ImpurityMeasure::Entropy, SignificanceLevel::NoPruning)?;
        let gini = self.grow(train, ImpurityMeasure::Gini, SignificanceLevel::NoPruning)?;
        let comparison = ImpurityComparison {
            entropy_validation_error: evaluate(&entropy, validation)?.average_error,
            gini_validation_error: evaluate(&gini, validation)?.average_error,
        };
        info!(
            "validation error: entropy {:.4}, gini {:.4}",
            comparison.entropy_validation_error, comparison.gini_validation_error
        );
        Ok(comparison)
    }

    pub fn run(
        &self,
        train: &Dataset,
        validation: &Dataset,
        test: Option<&Dataset>,
    ) -> Result<SweepOutcome, TreeError> {
        let (impurity_comparison, impurity) = match self.impurity {
            Some(impurity) => (None, impurity),
            None => {
                let comparison = self.compare_impurities(train, validation)?;
                (Some(comparison), comparison.winner())
            }
        };
        info!("sweeping significance levels with {impurity}");

        let mut levels = Vec::new();
        let mut best: Option<(SignificanceLevel, f64)> = None;
        for significance in SignificanceLevel::iter() {
            let tree = self.grow(train, impurity, significance)?;
            let result = LevelResult {
                significance,
                train_error: evaluate(&tree, train)?.average_error,
                validation: evaluate(&tree, validation)?,
                node_count: tree.node_count(),
            };
            info!(
                "p = {significance}: train error {:.4}, validation error {:.4}, {} nodes",
                result.train_error, result.validation.average_error, result.node_count
            );
            if best.is_none_or(|(_, error)| result.validation.average_error < error) {
                best = Some((significance, result.validation.average_error));
            }
            levels.push(result);
        }
        let best_significance = best.map(|(level, _)| level).unwrap_or_default();
        info!("best validation error at p = {best_significance}");

        let best_tree = self.grow(train, impurity, best_significance)?;
        let test = test.map(|t| evaluate(&best_tree, t)).transpose()?;

        let report = SweepReport {
            timestamp: Utc::now().to_rfc3339(),
            relation: train.header().relation_name().to_string(),
            train_instances: train.len(),
            validation_instances: validation.len(),
            impurity_comparison,
            impurity,
            levels,
            best_significance,
            test,
        };
        Ok(SweepOutcome { report, best_tree })
    }
}

const RULE: &str = "---------------------------------------------------------";

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(c) = &self.impurity_comparison {
            writeln!(f, "Validation error using Entropy: {}", c.entropy_validation_error)?;
            writeln!(f, "Validation error using Gini: {}", c.gini_validation_error)?;
            writeln!(f, "{RULE}")?;
        }
        for level in &self.levels {
            writeln!(f, "Decision Tree with p_value of: {}", level.significance)?;
            writeln!(f, "The train error of the decision tree is: {}", level.train_error)?;
            writeln!(f, "Max height on validation data: {}", level.validation.max_height)?;
            writeln!(f, "Average height on validation data: {}", level.validation.average_height)?;
            writeln!(
                f,
                "The validation error of the decision tree is: {}",
                level.validation.average_error
            )?;
            writeln!(f, "{RULE}")?;
        }
        writeln!(f, "Best validation error at p_value = {}", self.best_significance)?;
        if let Some(test) = &self.test {
            writeln!(f, "Test error with best tree: {}", test.average_error)?;
        }
        Ok(())
    }
}
