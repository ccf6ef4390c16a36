use crate::classifiers::conditional_tests::{InstanceConditionalTest, NominalAttributeMultiwayTest};
use crate::classifiers::decision_tree::class_distribution::ClassDistribution;

/// Handle of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) split_test: Option<NominalAttributeMultiwayTest>,
    /// Indexed by value of the split attribute; `None` where no training
    /// instance had that value.
    pub(crate) children: Vec<Option<NodeId>>,
    pub(crate) predicted_class: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) instance_count: usize,
    pub(crate) class_distribution: ClassDistribution,
}

impl Node {
    pub(crate) fn new(
        parent: Option<NodeId>,
        class_distribution: ClassDistribution,
        predicted_class: usize,
    ) -> Self {
        Self {
            split_test: None,
            children: Vec::new(),
            predicted_class,
            parent,
            instance_count: class_distribution.total,
            class_distribution,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Majority class of the training instances that reached this node.
    pub fn predicted_class(&self) -> usize {
        self.predicted_class
    }

    pub fn split_test(&self) -> Option<&NominalAttributeMultiwayTest> {
        self.split_test.as_ref()
    }

    /// Attribute this node splits on, for internal nodes.
    pub fn split_attribute(&self) -> Option<usize> {
        self.split_test.map(|t| t.attribute_index())
    }

    pub fn get_child(&self, value: usize) -> Option<NodeId> {
        self.children.get(value).copied().flatten()
    }

    /// Linked children with the value index leading to each.
    pub fn children(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(value, child)| child.map(|id| (value, id)))
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn instance_count(&self) -> usize {
        self.instance_count
    }

    pub fn observed_class_distribution_is_pure(&self) -> bool {
        self.class_distribution.is_pure()
    }

    /// Turns the node into a split with one empty child slot per branch.
    pub(crate) fn set_split(&mut self, split_test: NominalAttributeMultiwayTest) {
        self.children = vec![None; split_test.max_branches()];
        self.split_test = Some(split_test);
    }

    pub(crate) fn set_child(&mut self, value: usize, child: NodeId) {
        if value >= self.children.len() {
            self.children.resize(value + 1, None);
        }
        self.children[value] = Some(child);
    }
}
