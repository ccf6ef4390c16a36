use crate::classifiers::classifier::{Classifier, Prediction};
use crate::classifiers::conditional_tests::InstanceConditionalTest;
use crate::classifiers::decision_tree::nodes::{Node, NodeId};
use crate::classifiers::decision_tree::tree_builder::TreeBuilder;
use crate::classifiers::decision_tree::tree_config::TreeConfig;
use crate::core::dataset::Dataset;
use crate::core::errors::{DataError, TreeError};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::fmt;
use std::sync::Arc;

/// Binary decision tree over nominal attributes.
///
/// Created empty, filled by one call to [`Classifier::train`] (or returned
/// ready by [`TreeBuilder::build`]) and read-only afterwards.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    config: TreeConfig,
    header: Option<Arc<InstanceHeader>>,
    nodes: Vec<Node>,
    positive_class: usize,
}

impl DecisionTree {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            header: None,
            nodes: Vec::new(),
            positive_class: 0,
        }
    }

    pub(crate) fn from_parts(
        config: TreeConfig,
        header: Arc<InstanceHeader>,
        nodes: Vec<Node>,
        positive_class: usize,
    ) -> Self {
        Self {
            config,
            header: Some(header),
            nodes,
            positive_class,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn header(&self) -> Option<&InstanceHeader> {
        self.header.as_deref()
    }

    pub fn positive_class(&self) -> usize {
        self.positive_class
    }

    pub fn is_built(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        (0..self.nodes.len())
            .map(|i| self.depth_of(NodeId(i)))
            .max()
            .unwrap_or(0)
    }

    /// Edges between `id` and the root.
    pub fn depth_of(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).and_then(Node::parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).and_then(Node::parent);
        }
        depth
    }

    /// Fails unless instances of `header` can be routed through this tree.
    pub fn check_header(&self, header: &InstanceHeader) -> Result<(), TreeError> {
        let trained = self.header.as_deref().ok_or(TreeError::NotBuilt)?;
        if !trained.accepts(header) {
            let name = format!("relation {}", header.relation_name());
            return Err(DataError::IncompatibleHeader(name).into());
        }
        Ok(())
    }

    /// Walks `instance` down from the root and returns the node where the walk
    /// stops with the number of edges taken. The walk stops at a leaf, or
    /// early at an internal node with no child for the instance's value.
    pub fn filter_instance_to_leaf(
        &self,
        instance: &dyn Instance,
    ) -> Result<(NodeId, usize), TreeError> {
        if !self.is_built() {
            return Err(TreeError::NotBuilt);
        }
        self.check_header(instance.header())?;
        let mut id = NodeId(0);
        let mut height = 0;
        while let Some(node) = self.node(id) {
            let Some(test) = node.split_test().filter(|_| !node.is_leaf()) else {
                break;
            };
            let value = test.branch_for_instance(instance).ok_or_else(|| {
                let name = instance
                    .attribute_at_index(test.attribute_index())
                    .map(|a| a.name().to_string())
                    .unwrap_or_else(|| format!("#{}", test.attribute_index()));
                DataError::MissingValue(name)
            })?;
            match node.get_child(value) {
                Some(child) => {
                    id = child;
                    height += 1;
                }
                None => break,
            }
        }
        Ok((id, height))
    }

    pub fn classify(&self, instance: &dyn Instance) -> Result<Prediction, TreeError> {
        let (id, height) = self.filter_instance_to_leaf(instance)?;
        let node = self.node(id).ok_or(TreeError::NotBuilt)?;
        Ok(Prediction {
            class_index: node.predicted_class(),
            height,
        })
    }

    fn class_label(&self, class: usize) -> String {
        self.header
            .as_deref()
            .and_then(InstanceHeader::class_attribute)
            .and_then(|a| a.value(class))
            .map(str::to_string)
            .unwrap_or_else(|| class.to_string())
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, indent: usize) -> fmt::Result {
        let Some(node) = self.node(id) else {
            return Ok(());
        };
        let pad = "    ".repeat(indent);
        let class = self.class_label(node.predicted_class());
        if node.is_leaf() {
            return writeln!(f, "{pad}Leaf. Returning value: {class}");
        }
        writeln!(f, "{pad}Returning value: {class}")?;
        let attribute = node
            .split_attribute()
            .and_then(|i| self.header.as_deref()?.attribute_at_index(i));
        for (value, child) in node.children() {
            let name = attribute.map(|a| a.name().to_string()).unwrap_or_default();
            let label = attribute
                .and_then(|a| a.value(value))
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string());
            writeln!(f, "{pad}If attribute {name} = {label}")?;
            self.fmt_node(f, child, indent + 1)?;
        }
        Ok(())
    }
}

impl Classifier for DecisionTree {
    fn train(&mut self, dataset: &Dataset) -> Result<(), TreeError> {
        *self = TreeBuilder::new(self.config.clone()).build(dataset)?;
        Ok(())
    }

    fn classify(&self, instance: &dyn Instance) -> Result<Prediction, TreeError> {
        DecisionTree::classify(self, instance)
    }

    fn header(&self) -> Option<&InstanceHeader> {
        DecisionTree::header(self)
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_built() {
            return writeln!(f, "(empty tree)");
        }
        writeln!(f, "Root")?;
        self.fmt_node(f, NodeId(0), 0)
    }
}
