use crate::core::attributes::{AttributeRef, NominalAttribute};
use crate::core::instance_header::InstanceHeader;
use std::sync::Arc;

/// Header from `(name, domain)` pairs.
pub fn header_from(attributes: &[(&str, &[&str])], class_index: usize) -> Arc<InstanceHeader> {
    let attributes = attributes
        .iter()
        .map(|(name, values)| {
            Arc::new(NominalAttribute::with_values(
                name.to_string(),
                values.iter().map(|v| v.to_string()).collect(),
            )) as AttributeRef
        })
        .collect();
    Arc::new(InstanceHeader::new("test".into(), attributes, class_index))
}

/// `A in {x, y}` followed by `class in {pos, neg}`.
pub fn header_single_binary_attribute() -> Arc<InstanceHeader> {
    header_from(&[("A", &["x", "y"]), ("class", &["pos", "neg"])], 1)
}

/// Like [`header_single_binary_attribute`] but `A` also admits `z`.
pub fn header_with_unseen_value() -> Arc<InstanceHeader> {
    header_from(&[("A", &["x", "y", "z"]), ("class", &["pos", "neg"])], 1)
}
