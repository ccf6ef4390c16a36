mod nominal_attribute;

pub use nominal_attribute::NominalAttribute;

use std::sync::Arc;

/// Shared handle to an attribute definition; headers and instances hold these.
pub type AttributeRef = Arc<NominalAttribute>;
