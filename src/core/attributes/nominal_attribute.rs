use std::collections::HashMap;

/// A named categorical field with a fixed, ordered domain of labels.
///
/// The position of a label in `values` is its index everywhere else in the
/// crate: instances store indices, tree nodes key their children by them.
#[derive(Debug, Clone, PartialEq)]
pub struct NominalAttribute {
    pub name: String,
    pub values: Vec<String>,
    pub label_to_index: HashMap<String, usize>,
}

impl NominalAttribute {
    /// Builds the attribute and its reverse index from an ordered label list.
    /// Duplicate labels keep their first position.
    pub fn with_values(name: String, values: Vec<String>) -> NominalAttribute {
        let mut label_to_index = HashMap::with_capacity(values.len());
        for (i, v) in values.iter().enumerate() {
            label_to_index.entry(v.clone()).or_insert(i);
        }
        NominalAttribute {
            name,
            values,
            label_to_index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number_of_values(&self) -> usize {
        self.values.len()
    }

    pub fn index_of_value(&self, label: &str) -> Option<usize> {
        self.label_to_index.get(label).copied()
    }

    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.values.len()
    }
}
