use crate::classifiers::decision_tree::class_distribution::ClassDistribution;
use crate::core::errors::{ConfigError, TreeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{EnumIter, EnumMessage};

/// Chi-square critical values, rows for 1..=13 degrees of freedom and one
/// column per [`SignificanceLevel`]. Column 0 is never consulted.
const CRITICAL_VALUES: [[f64; 6]; 13] = [
    [0.0, 0.102, 0.455, 1.323, 3.841, 7.879],
    [0.0, 0.575, 1.386, 2.773, 5.991, 10.597],
    [0.0, 1.213, 2.366, 4.108, 7.815, 12.838],
    [0.0, 1.923, 3.357, 5.385, 9.488, 14.860],
    [0.0, 2.675, 4.351, 6.626, 11.070, 16.750],
    [0.0, 3.455, 5.348, 7.841, 12.592, 18.548],
    [0.0, 4.255, 6.346, 9.037, 14.067, 20.278],
    [0.0, 5.071, 7.344, 10.219, 15.507, 21.955],
    [0.0, 5.899, 8.343, 11.389, 16.919, 23.589],
    [0.0, 6.737, 9.342, 12.549, 18.307, 25.188],
    [0.0, 7.584, 10.341, 13.701, 19.675, 26.757],
    [0.0, 8.438, 11.340, 14.845, 21.026, 28.300],
    [0.0, 9.299, 12.340, 15.984, 22.362, 29.819],
];

/// Largest degrees of freedom the critical value table covers.
pub const MAX_DEGREES_OF_FREEDOM: usize = CRITICAL_VALUES.len();

/// Significance level of the pre-pruning test. `NoPruning` (p = 1) skips the
/// test altogether.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumMessage,
)]
#[serde(try_from = "f64", into = "f64")]
pub enum SignificanceLevel {
    #[default]
    #[strum(message = "1 (no pruning)")]
    NoPruning,
    #[strum(message = "0.75")]
    P075,
    #[strum(message = "0.5")]
    P050,
    #[strum(message = "0.25")]
    P025,
    #[strum(message = "0.05")]
    P005,
    #[strum(message = "0.005")]
    P0005,
}

impl SignificanceLevel {
    /// Column of the critical value table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn p_value(self) -> f64 {
        match self {
            SignificanceLevel::NoPruning => 1.0,
            SignificanceLevel::P075 => 0.75,
            SignificanceLevel::P050 => 0.5,
            SignificanceLevel::P025 => 0.25,
            SignificanceLevel::P005 => 0.05,
            SignificanceLevel::P0005 => 0.005,
        }
    }

    pub fn prunes(self) -> bool {
        self != SignificanceLevel::NoPruning
    }
}

impl TryFrom<usize> for SignificanceLevel {
    type Error = ConfigError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(SignificanceLevel::NoPruning),
            1 => Ok(SignificanceLevel::P075),
            2 => Ok(SignificanceLevel::P050),
            3 => Ok(SignificanceLevel::P025),
            4 => Ok(SignificanceLevel::P005),
            5 => Ok(SignificanceLevel::P0005),
            _ => Err(ConfigError::InvalidSignificanceIndex(index)),
        }
    }
}

impl TryFrom<f64> for SignificanceLevel {
    type Error = ConfigError;

    fn try_from(p: f64) -> Result<Self, Self::Error> {
        use strum::IntoEnumIterator;
        SignificanceLevel::iter()
            .find(|level| (level.p_value() - p).abs() < 1e-9)
            .ok_or_else(|| ConfigError::UnknownSignificanceLevel(p.to_string()))
    }
}

impl From<SignificanceLevel> for f64 {
    fn from(level: SignificanceLevel) -> Self {
        level.p_value()
    }
}

impl fmt::Display for SignificanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.p_value())
    }
}

/// Outcome of one chi-square test on a candidate split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquareTest {
    pub statistic: f64,
    pub degrees_of_freedom: usize,
    pub critical_value: f64,
    pub prune: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChiSquarePruner {
    level: SignificanceLevel,
}

impl ChiSquarePruner {
    pub fn new(level: SignificanceLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> SignificanceLevel {
        self.level
    }

    /// Sum over non-empty subsets of `(observed - expected)^2 / expected`
    /// for both classes. Cells with zero expectation contribute nothing.
    pub fn statistic(parent: &ClassDistribution, children: &[ClassDistribution]) -> f64 {
        let p = parent.positive_probability();
        children
            .iter()
            .filter(|d| !d.is_empty())
            .map(|d| {
                let size = d.total as f64;
                cell(d.positive as f64, size * p) + cell(d.negative() as f64, size * (1.0 - p))
            })
            .sum()
    }

    /// Observed values of the split attribute, minus one.
    pub fn degrees_of_freedom(children: &[ClassDistribution]) -> usize {
        children
            .iter()
            .filter(|d| !d.is_empty())
            .count()
            .saturating_sub(1)
    }

    pub fn critical_value(
        degrees_of_freedom: usize,
        level: SignificanceLevel,
    ) -> Result<f64, TreeError> {
        if !(1..=MAX_DEGREES_OF_FREEDOM).contains(&degrees_of_freedom) {
            return Err(TreeError::DegreesOfFreedomOutOfRange(degrees_of_freedom));
        }
        Ok(CRITICAL_VALUES[degrees_of_freedom - 1][level.index()])
    }

    /// Runs the test, or returns `None` when pruning is disabled.
    pub fn evaluate(
        &self,
        parent: &ClassDistribution,
        children: &[ClassDistribution],
    ) -> Result<Option<ChiSquareTest>, TreeError> {
        if !self.level.prunes() {
            return Ok(None);
        }
        let degrees_of_freedom = Self::degrees_of_freedom(children);
        let critical_value = Self::critical_value(degrees_of_freedom, self.level)?;
        let statistic = Self::statistic(parent, children);
        Ok(Some(ChiSquareTest {
            statistic,
            degrees_of_freedom,
            critical_value,
            prune: statistic < critical_value,
        }))
    }
}

#[inline]
fn cell(observed: f64, expected: f64) -> f64 {
    if expected <= 0.0 {
        return 0.0;
    }
    (observed - expected).powi(2) / expected
}
