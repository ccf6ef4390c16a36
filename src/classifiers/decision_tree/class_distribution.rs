use crate::core::dataset::Dataset;
use crate::core::errors::DataError;
use crate::core::instances::Instance;

/// Positive/total counts of a set of instances under a binary class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassDistribution {
    pub positive: usize,
    pub total: usize,
}

impl ClassDistribution {
    pub fn new(positive: usize, total: usize) -> Self {
        debug_assert!(positive <= total);
        Self { positive, total }
    }

    /// Counts the class values of `rows`.
    pub fn of_rows(
        dataset: &Dataset,
        rows: &[usize],
        positive_class: usize,
    ) -> Result<Self, DataError> {
        let mut distribution = Self::default();
        for &row in rows {
            distribution.add(class_of(dataset, row)? == positive_class);
        }
        Ok(distribution)
    }

    #[inline]
    pub fn add(&mut self, is_positive: bool) {
        self.total += 1;
        if is_positive {
            self.positive += 1;
        }
    }

    #[inline]
    pub fn negative(&self) -> usize {
        self.total - self.positive
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Share of positive instances; 0 for an empty set.
    #[inline]
    pub fn positive_probability(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.positive as f64 / self.total as f64
    }

    pub fn is_pure(&self) -> bool {
        self.positive == 0 || self.positive == self.total
    }

    /// The negative class wins only with strictly more than half the
    /// instances; a tie goes to the positive class.
    pub fn majority_class(&self, positive_class: usize) -> usize {
        if self.negative() * 2 > self.total {
            1 - positive_class
        } else {
            positive_class
        }
    }
}

pub(crate) fn class_of(dataset: &Dataset, row: usize) -> Result<usize, DataError> {
    let instance = dataset.instance(row).ok_or(DataError::RowOutOfRange {
        row,
        len: dataset.len(),
    })?;
    instance.class_value().ok_or_else(|| {
        let name = dataset
            .header()
            .class_attribute()
            .map(|a| a.name().to_string())
            .unwrap_or_default();
        DataError::MissingValue(name)
    })
}
