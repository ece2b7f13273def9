use std::fmt::{Debug, Display};

use super::{NodeId, PLACEHOLDER};

#[derive(Clone)]
/// A node of the Topology
pub struct Node {
    /// Index of the node
    pub id: NodeId,
    /// Label of the node, only set on leaves of labelled trees
    pub name: Option<String>,
    /// Index of the parent node
    pub parent: Option<NodeId>,
    /// Indices of child nodes, in left to right order
    pub children: Vec<NodeId>,
}

impl Node {
    /// Creates a new Node
    pub fn new() -> Self {
        Self {
            id: 0,
            name: None,
            parent: None,
            children: vec![],
        }
    }

    /// Creates a new named Node
    pub fn new_named(name: &str) -> Self {
        Self {
            name: Some(String::from(name)),
            ..Self::new()
        }
    }

    /// Sets the Node name
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Sets the internal Node id
    pub fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    /// Set the parent node
    pub fn set_parent(&mut self, parent: NodeId) {
        self.parent = Some(parent);
    }

    /// Adds a child to the node
    /// ```
    /// use randtree::tree::Node;
    ///
    /// let mut parent = Node::new();
    /// parent.id = 0;
    /// let mut child = Node::new();
    /// child.id = 1;
    ///
    /// child.set_parent(parent.id);
    /// parent.add_child(child.id);
    ///
    /// assert_eq!(child.parent, Some(0));
    /// assert_eq!(parent.children, vec![1]);
    /// ```
    pub fn add_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    /// Check if the node is a tip node
    pub fn is_tip(&self) -> bool {
        self.children.is_empty()
    }

    /// Check if the node is a root node
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the newick representation of the node label.
    /// Unnamed tips are written as the placeholder symbol,
    /// unnamed internal nodes are written as an empty string.
    /// ```
    /// use randtree::tree::Node;
    ///
    /// assert_eq!(Node::new().to_newick(), "#");
    /// assert_eq!(Node::new_named("Homo_sapiens").to_newick(), "Homo_sapiens");
    /// ```
    pub fn to_newick(&self) -> String {
        match (&self.name, self.is_tip()) {
            (Some(name), _) => name.clone(),
            (None, true) => PLACEHOLDER.to_string(),
            (None, false) => String::new(),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        if self.is_root() != other.is_root() {
            return false;
        }

        self.name == other.name && self.children.len() == other.children.len()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Eq for Node {}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_newick())
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} Id[{}] Parent[{:?}] Children({:?})",
            self.name, self.id, self.parent, self.children,
        )
    }
}
