use crate::core::attributes::{AttributeRef, NominalAttribute};
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::DenseInstance;
use crate::testing::dummies::header_single_binary_attribute;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

pub fn dataset_from_rows(header: Arc<InstanceHeader>, rows: &[&[usize]]) -> Dataset {
    let instances = rows
        .iter()
        .map(|r| DenseInstance::new(Arc::clone(&header), r.to_vec()).unwrap())
        .collect();
    Dataset::with_instances(header, instances).unwrap()
}

/// `(x,0), (x,0), (y,1), (y,1)` over [`header_single_binary_attribute`].
pub fn four_row_dataset() -> Dataset {
    dataset_from_rows(
        header_single_binary_attribute(),
        &[&[0, 0], &[0, 0], &[1, 1], &[1, 1]],
    )
}

/// Seeded random dataset with `attributes` predictors of `cardinality` values
/// each and a binary class in the last slot.
///
/// The class is a noisy function of the first two predictors, so trees have
/// real structure to find and the chi-square test has something to prune.
pub fn random_dataset(seed: u64, attributes: usize, cardinality: usize, rows: usize) -> Dataset {
    let mut defs: Vec<AttributeRef> = (0..attributes)
        .map(|i| {
            Arc::new(NominalAttribute::with_values(
                format!("a{i}"),
                (0..cardinality).map(|v| format!("v{v}")).collect(),
            )) as AttributeRef
        })
        .collect();
    defs.push(Arc::new(NominalAttribute::with_values(
        "class".into(),
        vec!["pos".into(), "neg".into()],
    )));
    let header = Arc::new(InstanceHeader::new("random".into(), defs, attributes));

    let mut rng = StdRng::seed_from_u64(seed);
    let instances = (0..rows)
        .map(|_| {
            let mut values: Vec<usize> = (0..attributes)
                .map(|_| rng.random_range(0..cardinality))
                .collect();
            let signal = values.first().copied().unwrap_or(0) + values.get(1).copied().unwrap_or(0);
            let mut class = signal % 2;
            if rng.random_bool(0.2) {
                class = 1 - class;
            }
            values.push(class);
            DenseInstance::new(Arc::clone(&header), values).unwrap()
        })
        .collect();
    Dataset::with_instances(header, instances).unwrap()
}
