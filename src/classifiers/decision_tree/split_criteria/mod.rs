mod entropy_split_criterion;
mod gini_split_criterion;
mod split_criterion;

pub use entropy_split_criterion::EntropySplitCriterion;
pub use gini_split_criterion::GiniSplitCriterion;
pub use split_criterion::SplitCriterion;

use crate::core::errors::ConfigError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// Which impurity drives attribute selection.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ImpurityMeasure {
    #[default]
    #[strum(message = "Entropy", detailed_message = "Binary Shannon entropy, in bits.")]
    Entropy,
    #[strum(message = "Gini", detailed_message = "Gini index, 1 - sum of squared shares.")]
    Gini,
}

impl ImpurityMeasure {
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        name.trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| ConfigError::UnknownImpurity(name.to_string()))
    }

    pub fn criterion(self) -> Box<dyn SplitCriterion> {
        match self {
            ImpurityMeasure::Entropy => Box::new(EntropySplitCriterion::new()),
            ImpurityMeasure::Gini => Box::new(GiniSplitCriterion::new()),
        }
    }
}
