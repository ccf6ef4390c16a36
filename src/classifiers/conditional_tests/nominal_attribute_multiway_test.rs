use crate::classifiers::conditional_tests::InstanceConditionalTest;
use crate::core::instances::Instance;

/// One branch per domain value of a nominal attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NominalAttributeMultiwayTest {
    attribute_index: usize,
    branches: usize,
}

impl NominalAttributeMultiwayTest {
    pub fn new(attribute_index: usize, branches: usize) -> Self {
        Self {
            attribute_index,
            branches,
        }
    }

    pub fn attribute_index(&self) -> usize {
        self.attribute_index
    }
}

impl InstanceConditionalTest for NominalAttributeMultiwayTest {
    fn branch_for_instance(&self, instance: &dyn Instance) -> Option<usize> {
        instance.value_at_index(self.attribute_index)
    }

    fn max_branches(&self) -> usize {
        self.branches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instances::DenseInstance;
    use crate::testing::dummies::header_with_unseen_value;

    #[test]
    fn branches_on_value_index() {
        let test = NominalAttributeMultiwayTest::new(0, 3);
        let instance = DenseInstance::new(header_with_unseen_value(), vec![2, 0]).unwrap();
        assert_eq!(test.branch_for_instance(&instance), Some(2));
        assert_eq!(test.max_branches(), 3);
    }

    #[test]
    fn absent_attribute_has_no_branch() {
        let test = NominalAttributeMultiwayTest::new(5, 2);
        let instance = DenseInstance::new(header_with_unseen_value(), vec![0, 1]).unwrap();
        assert_eq!(test.branch_for_instance(&instance), None);
    }
}
