use crate::core::attributes::{AttributeRef, NominalAttribute};
use crate::core::errors::DataError;

/// Schema shared by every instance of a dataset: relation name, ordered
/// attributes and which of them is the class.
#[derive(Debug, Clone)]
pub struct InstanceHeader {
    pub relation_name: String,
    pub attributes: Vec<AttributeRef>,
    pub class_index: usize,
}

impl InstanceHeader {
    pub fn new(
        relation_name: String,
        attributes: Vec<AttributeRef>,
        class_index: usize,
    ) -> InstanceHeader {
        InstanceHeader {
            relation_name,
            attributes,
            class_index,
        }
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&NominalAttribute> {
        self.attributes.get(index).map(AttributeRef::as_ref)
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|attr| attr.name() == name)
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn class_attribute(&self) -> Option<&NominalAttribute> {
        self.attribute_at_index(self.class_index)
    }

    pub fn number_of_classes(&self) -> usize {
        self.class_attribute()
            .map(NominalAttribute::number_of_values)
            .unwrap_or(0)
    }

    /// Indices of every attribute except the class, in declaration order.
    pub fn predictor_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.attributes.len()).filter(move |&i| i != self.class_index)
    }

    /// Checks that the class attribute exists and has exactly two labels.
    pub fn ensure_binary_class(&self) -> Result<&NominalAttribute, DataError> {
        let class_attribute = self
            .class_attribute()
            .ok_or(DataError::AttributeOutOfRange {
                index: self.class_index,
                count: self.attributes.len(),
            })?;
        if class_attribute.number_of_values() != 2 {
            return Err(DataError::NonBinaryClass {
                attribute: class_attribute.name().to_string(),
                values: class_attribute.number_of_values(),
            });
        }
        Ok(class_attribute)
    }

    /// Same attribute names and domains, same class index. The relation name
    /// may differ.
    pub fn is_compatible_with(&self, other: &InstanceHeader) -> bool {
        self.class_index == other.class_index
            && self.attributes.len() == other.attributes.len()
            && self
                .attributes
                .iter()
                .zip(other.attributes.iter())
                .all(|(a, b)| a == b)
    }

    /// Whether instances of `other` can be read with indices learned on this
    /// header: same class index, same attribute names in the same positions,
    /// same class labels. Predictor domains of `other` may append labels;
    /// those surface as values no training instance had.
    pub fn accepts(&self, other: &InstanceHeader) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.class_index == other.class_index
            && self.attributes.len() == other.attributes.len()
            && self
                .attributes
                .iter()
                .zip(other.attributes.iter())
                .enumerate()
                .all(|(i, (a, b))| {
                    if i == self.class_index {
                        return a == b;
                    }
                    a.name() == b.name() && b.values.starts_with(&a.values)
                })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn attr(name: &str, values: &[&str]) -> AttributeRef {
        Arc::new(NominalAttribute::with_values(
            name.into(),
            values.iter().map(|v| v.to_string()).collect(),
        ))
    }

    #[test]
    fn predictors_skip_the_class() {
        let h = InstanceHeader::new(
            "r".into(),
            vec![attr("a", &["x"]), attr("c", &["p", "n"]), attr("b", &["y"])],
            1,
        );
        assert_eq!(h.predictor_indices().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(h.index_of_attribute("b"), Some(2));
        assert_eq!(h.number_of_classes(), 2);
        assert_eq!(h.class_attribute().map(|a| a.name()), Some("c"));
    }

    #[test]
    fn rejects_non_binary_class() {
        let h = InstanceHeader::new("r".into(), vec![attr("c", &["a", "b", "c"])], 0);
        let err = h.ensure_binary_class().unwrap_err();
        assert!(matches!(err, DataError::NonBinaryClass { values: 3, .. }));
    }

    #[test]
    fn rejects_class_index_past_the_end() {
        let h = InstanceHeader::new("r".into(), vec![attr("c", &["a", "b"])], 4);
        assert!(matches!(
            h.ensure_binary_class(),
            Err(DataError::AttributeOutOfRange { index: 4, count: 1 })
        ));
    }

    #[test]
    fn compatibility_compares_domains() {
        let a = InstanceHeader::new("r".into(), vec![attr("c", &["a", "b"])], 0);
        let b = InstanceHeader::new("s".into(), vec![attr("c", &["a", "b"])], 0);
        let c = InstanceHeader::new("r".into(), vec![attr("c", &["b", "a"])], 0);
        assert!(a.is_compatible_with(&b));
        assert!(!a.is_compatible_with(&c));
    }

    #[test]
    fn accepts_appended_predictor_labels_only() {
        let trained = InstanceHeader::new(
            "r".into(),
            vec![attr("a", &["x", "y"]), attr("c", &["p", "n"])],
            1,
        );
        let extended = InstanceHeader::new(
            "s".into(),
            vec![attr("a", &["x", "y", "z"]), attr("c", &["p", "n"])],
            1,
        );
        let reordered = InstanceHeader::new(
            "r".into(),
            vec![attr("a", &["y", "x"]), attr("c", &["p", "n"])],
            1,
        );
        let swapped = InstanceHeader::new(
            "r".into(),
            vec![attr("c", &["p", "n"]), attr("a", &["x", "y"])],
            0,
        );
        let wider_class = InstanceHeader::new(
            "r".into(),
            vec![attr("a", &["x", "y"]), attr("c", &["p", "n", "m"])],
            1,
        );
        assert!(trained.accepts(&trained));
        assert!(trained.accepts(&extended));
        assert!(!extended.accepts(&trained));
        assert!(!trained.accepts(&reordered));
        assert!(!trained.accepts(&swapped));
        assert!(!trained.accepts(&wider_class));
    }
}
