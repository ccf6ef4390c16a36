use crate::core::attributes::NominalAttribute;
use crate::core::errors::DataError;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::instance::Instance;
use std::sync::Arc;

/// Instance storing one domain index per attribute, class included.
#[derive(Debug, Clone)]
pub struct DenseInstance {
    pub header: Arc<InstanceHeader>,
    pub values: Vec<usize>,
}

impl DenseInstance {
    /// Validates arity and that every value lies inside its attribute's domain.
    pub fn new(
        header: Arc<InstanceHeader>,
        values: Vec<usize>,
    ) -> Result<DenseInstance, DataError> {
        if values.len() != header.number_of_attributes() {
            return Err(DataError::SchemaMismatch {
                expected: header.number_of_attributes(),
                got: values.len(),
            });
        }
        for (attr, &v) in header.attributes.iter().zip(values.iter()) {
            if !attr.contains_index(v) {
                return Err(DataError::IndexOutOfDomain {
                    attribute: attr.name().to_string(),
                    index: v,
                    cardinality: attr.number_of_values(),
                });
            }
        }
        Ok(DenseInstance { header, values })
    }

    /// Looks every label up in its attribute's domain.
    pub fn from_labels<S: AsRef<str>>(
        header: Arc<InstanceHeader>,
        labels: &[S],
    ) -> Result<DenseInstance, DataError> {
        if labels.len() != header.number_of_attributes() {
            return Err(DataError::SchemaMismatch {
                expected: header.number_of_attributes(),
                got: labels.len(),
            });
        }
        let values = header
            .attributes
            .iter()
            .zip(labels.iter())
            .map(|(attr, label)| {
                attr.index_of_value(label.as_ref())
                    .ok_or_else(|| DataError::ValueOutOfDomain {
                        attribute: attr.name().to_string(),
                        value: label.as_ref().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DenseInstance { header, values })
    }
}

impl Instance for DenseInstance {
    fn value_at_index(&self, index: usize) -> Option<usize> {
        self.values.get(index).copied()
    }

    fn attribute_at_index(&self, index: usize) -> Option<&NominalAttribute> {
        self.header.attribute_at_index(index)
    }

    fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.header.index_of_attribute(name)
    }

    fn number_of_attributes(&self) -> usize {
        self.header.number_of_attributes()
    }

    fn class_index(&self) -> usize {
        self.header.class_index()
    }

    fn class_value(&self) -> Option<usize> {
        self.values.get(self.header.class_index()).copied()
    }

    fn number_of_classes(&self) -> usize {
        self.header.number_of_classes()
    }

    fn to_vec(&self) -> Vec<usize> {
        self.values.clone()
    }

    fn header(&self) -> &InstanceHeader {
        &self.header
    }
}
