use crate::core::attributes::NominalAttribute;
use crate::core::instance_header::InstanceHeader;

/// Read-only view of one record: nominal values addressed by attribute index.
///
/// Values are domain indices into the matching [`NominalAttribute`]. The class
/// value is one of them, located at [`class_index`](Instance::class_index).
pub trait Instance {
    fn value_at_index(&self, index: usize) -> Option<usize>;

    fn attribute_at_index(&self, index: usize) -> Option<&NominalAttribute>;

    fn index_of_attribute(&self, name: &str) -> Option<usize>;

    fn number_of_attributes(&self) -> usize;

    fn class_index(&self) -> usize;

    fn class_value(&self) -> Option<usize>;

    fn number_of_classes(&self) -> usize;

    fn to_vec(&self) -> Vec<usize>;

    fn header(&self) -> &InstanceHeader;
}
