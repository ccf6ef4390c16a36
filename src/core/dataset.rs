use crate::core::errors::DataError;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::streams::Stream;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Ordered, in-memory collection of instances sharing one header.
#[derive(Debug, Clone)]
pub struct Dataset {
    header: Arc<InstanceHeader>,
    instances: Vec<DenseInstance>,
}

impl Dataset {
    pub fn new(header: Arc<InstanceHeader>) -> Dataset {
        Dataset {
            header,
            instances: Vec::new(),
        }
    }

    pub fn with_instances(
        header: Arc<InstanceHeader>,
        instances: Vec<DenseInstance>,
    ) -> Result<Dataset, DataError> {
        let mut dataset = Dataset::new(header);
        for instance in instances {
            dataset.push(instance)?;
        }
        Ok(dataset)
    }

    /// Drains `stream` until it is exhausted. The first malformed record aborts
    /// the load; nothing is skipped.
    pub fn from_stream(stream: &mut dyn Stream) -> Result<Dataset, DataError> {
        let mut dataset = Dataset::new(Arc::new(stream.header().clone()));
        while stream.has_more_instances() {
            let Some(next) = stream.next_instance() else {
                break;
            };
            let instance = next?;
            dataset.push(DenseInstance::new(
                Arc::clone(&dataset.header),
                instance.to_vec(),
            )?)?;
        }
        log::info!(
            "loaded {} instances of relation '{}'",
            dataset.len(),
            dataset.header.relation_name()
        );
        Ok(dataset)
    }

    pub fn push(&mut self, instance: DenseInstance) -> Result<(), DataError> {
        if !Arc::ptr_eq(&self.header, &instance.header)
            && !self.header.is_compatible_with(&instance.header)
        {
            return Err(DataError::SchemaMismatch {
                expected: self.header.number_of_attributes(),
                got: instance.number_of_attributes(),
            });
        }
        self.instances.push(instance);
        Ok(())
    }

    pub fn header(&self) -> &Arc<InstanceHeader> {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instance(&self, row: usize) -> Option<&DenseInstance> {
        self.instances.get(row)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DenseInstance> {
        self.instances.iter()
    }

    /// Domain size of the attribute at `index`.
    pub fn cardinality(&self, index: usize) -> Result<usize, DataError> {
        self.header
            .attribute_at_index(index)
            .map(|a| a.number_of_values())
            .ok_or(DataError::AttributeOutOfRange {
                index,
                count: self.header.number_of_attributes(),
            })
    }

    /// Shuffles rows with a seeded RNG and cuts off `holdout_fraction` of them.
    /// Returns `(remaining, holdout)`; both keep the original header.
    pub fn holdout_split(
        &self,
        holdout_fraction: f64,
        seed: u64,
    ) -> Result<(Dataset, Dataset), DataError> {
        if self.is_empty() {
            return Err(DataError::EmptyDataset);
        }
        let fraction = holdout_fraction.clamp(0.0, 1.0);
        let mut rows: Vec<usize> = (0..self.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        rows.shuffle(&mut rng);

        let holdout_len = ((self.len() as f64) * fraction).round() as usize;
        let (holdout_rows, remaining_rows) = rows.split_at(holdout_len);

        let pick = |rows: &[usize]| Dataset {
            header: Arc::clone(&self.header),
            instances: rows.iter().map(|&r| self.instances[r].clone()).collect(),
        };
        Ok((pick(remaining_rows), pick(holdout_rows)))
    }
}
