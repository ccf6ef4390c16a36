use crate::classifiers::decision_tree::ImpurityMeasure;
use crate::core::dataset::Dataset;
use crate::core::errors::{ConfigError, DataError, TreeError};
use crate::core::instance_header::InstanceHeader;
use crate::streams::ArffFileStream;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_validation_fraction() -> f64 {
    0.25
}

fn default_seed() -> u64 {
    42
}

fn default_true() -> bool {
    true
}

/// Inputs and options of a [`PruningSweep`](crate::tasks::PruningSweep) run,
/// as read from a JSON file or collected by the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub train_path: PathBuf,
    /// When absent, a holdout of `validation_fraction` is drawn from the
    /// training data.
    #[serde(default)]
    pub validation_path: Option<PathBuf>,
    #[serde(default = "default_validation_fraction")]
    pub validation_fraction: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub test_path: Option<PathBuf>,
    /// Defaults to the last attribute.
    #[serde(default)]
    pub class_index: Option<usize>,
    #[serde(default)]
    pub positive_class: Option<String>,
    /// Forces an impurity instead of picking the better one on validation.
    #[serde(default)]
    pub impurity: Option<ImpurityMeasure>,
    #[serde(default = "default_true")]
    pub print_tree: bool,
    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

/// Datasets a sweep runs on.
#[derive(Debug, Clone)]
pub struct SweepData {
    pub train: Dataset,
    pub validation: Dataset,
    pub test: Option<Dataset>,
}

impl SweepConfig {
    pub fn new<P: Into<PathBuf>>(train_path: P) -> Self {
        Self {
            train_path: train_path.into(),
            validation_path: None,
            validation_fraction: default_validation_fraction(),
            seed: default_seed(),
            test_path: None,
            class_index: None,
            positive_class: None,
            impurity: None,
            print_tree: true,
            report_path: None,
        }
    }

    /// Rebases relative data and report paths onto `base`, typically the
    /// directory of the config file.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        rebase(&mut self.train_path);
        self.validation_path.iter_mut().for_each(rebase);
        self.test_path.iter_mut().for_each(rebase);
        self.report_path.iter_mut().for_each(rebase);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.validation_path.is_none()
            && !(self.validation_fraction > 0.0 && self.validation_fraction < 1.0)
        {
            return Err(ConfigError::InvalidParameter(format!(
                "validation_fraction must lie in (0, 1), got {}",
                self.validation_fraction
            )));
        }
        Ok(())
    }

    pub fn load_data(&self) -> Result<SweepData, TreeError> {
        self.validate()?;
        let train = load_dataset(&self.train_path, self.class_index, None)?;
        let (train, validation) = match &self.validation_path {
            Some(path) => {
                let validation = load_dataset(path, self.class_index, Some(train.header()))?;
                (train, validation)
            }
            None => {
                let (train, validation) = train.holdout_split(self.validation_fraction, self.seed)?;
                info!(
                    "held out {} of {} training instances for validation",
                    validation.len(),
                    train.len() + validation.len()
                );
                (train, validation)
            }
        };
        let test = self
            .test_path
            .as_ref()
            .map(|path| load_dataset(path, self.class_index, Some(train.header())))
            .transpose()?;
        Ok(SweepData {
            train,
            validation,
            test,
        })
    }
}

fn load_dataset(
    path: &Path,
    class_index: Option<usize>,
    reference: Option<&InstanceHeader>,
) -> Result<Dataset, DataError> {
    let mut stream = ArffFileStream::new(path, class_index)?;
    let dataset = Dataset::from_stream(&mut stream)?;
    if let Some(reference) = reference {
        if !dataset.header().is_compatible_with(reference) {
            return Err(DataError::IncompatibleHeader(path.display().to_string()));
        }
    }
    Ok(dataset)
}
