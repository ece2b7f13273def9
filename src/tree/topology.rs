use rand::Rng;
use std::{collections::HashSet, fs, path::Path};

use thiserror::Error;

use super::node::Node;
use super::{NodeId, Rooting, PLACEHOLDER};

/// Errors that can occur when growing, labelling and writing [`Topology`] structs.
#[derive(Error, Debug)]
pub enum TopologyError {
    /// The topology has no nodes and we are trying to do something
    /// that requires at least one node
    #[error("This topology is empty.")]
    IsEmpty,
    /// No root node was found in the topology
    #[error("No root node found")]
    RootNotFound,
    /// The requested node with index [`NodeId`] does not exist in the topology
    #[error("There is no node with index: {0}")]
    NodeNotFound(NodeId),
    /// The leaf slot to split does not exist
    #[error("Cannot split leaf slot {slot}, the topology only has {n_leaves} slots.")]
    SlotOutOfRange {
        /// Requested slot index
        slot: usize,
        /// Number of leaf slots in the topology
        n_leaves: usize,
    },
    /// Growing can only add leaf slots, never remove them
    #[error("Cannot grow a topology with {current} leaf slots to {target} slots.")]
    TooFewLeaves {
        /// Number of leaf slots already in the topology
        current: usize,
        /// Requested number of leaf slots
        target: usize,
    },
    /// There must be exactly one label per leaf slot
    #[error("Got {labels} labels for a topology with {slots} leaf slots.")]
    LabelCountMismatch {
        /// Number of labels given
        labels: usize,
        /// Number of leaf slots in the topology
        slots: usize,
    },
}

/// Errors that can occur when parsing newick files.
#[derive(Error, Debug)]
pub enum NewickParseError {
    /// There is an unclosed bracket in the newick String
    #[error("Missing a closing bracket.")]
    UnclosedBracket,
    /// A closing bracket or a comma was found outside of any subtree
    #[error("Found a closing bracket or a comma outside of any subtree.")]
    UnopenedBracket,
    /// The newick string is missing a final semi-colon
    #[error("The tree is missing a semi colon at the end.")]
    NoClosingSemicolon,
    /// There is something other than whitespace after the semi-colon,
    /// or several subtrees at the top level
    #[error("Unexpected characters after the end of the tree.")]
    TrailingCharacters,
    /// A name is followed by an opening bracket or by more name text
    /// after a blank, instead of a comma, a closing bracket or a semi-colon
    #[error("Unexpected text after the name '{0}'.")]
    UnexpectedName(String),
    /// Two subtrees follow each other without a comma in between
    #[error("Missing a comma between two subtrees.")]
    MissingComma,
    /// Branch lengths are not part of generated trees
    #[error("Branch lengths are not supported.")]
    BranchLengthsUnsupported,
    /// The newick string has no node
    #[error("The tree is empty.")]
    EmptyTree,
    /// There was a [`TopologyError`] when building a topology from the newick string
    #[error("Problem with building the tree.")]
    TopologyError(#[from] TopologyError),
    /// There was a [`std::io::Error`] when reading a newick file
    #[error("Problem reading file")]
    IoError(#[from] std::io::Error),
}

/// A binary tree topology whose leaves are slots, optionally labelled.
///
/// Leaf slots are kept in the order in which they appear when the
/// topology is written as a newick string, from left to right.
#[derive(Debug, Clone)]
pub struct Topology {
    nodes: Vec<Node>,
    leaves: Vec<NodeId>,
}

/// Base methods to add and get [`Node`] objects to and from the [`Topology`].
///
/// ----
/// ----
impl Topology {
    /// Create a new empty Topology object
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            leaves: Vec::new(),
        }
    }

    /// Create the seed topology for a rooting convention:
    /// a root with 2 (rooted) or 3 (unrooted) leaf slots.
    /// ```
    /// use randtree::tree::{Rooting, Topology};
    ///
    /// let rooted = Topology::seed(Rooting::Rooted);
    /// assert_eq!(rooted.to_newick().unwrap(), "(#,#);");
    ///
    /// let unrooted = Topology::seed(Rooting::Unrooted);
    /// assert_eq!(unrooted.to_newick().unwrap(), "(#,#,#);");
    /// ```
    pub fn seed(rooting: Rooting) -> Self {
        let mut topology = Self::new();
        let root = topology.add(Node::new());
        for _ in 0..rooting.seed_tips() {
            let child = topology.add(Node::new());
            topology.nodes[child].set_parent(root);
            topology.nodes[root].add_child(child);
            topology.leaves.push(child);
        }

        topology
    }

    // ############################
    // # ADDING AND GETTING NODES #
    // ############################

    /// Add a new node to the topology.
    pub fn add(&mut self, node: Node) -> NodeId {
        let idx = self.nodes.len();
        let mut node = node;
        node.id = idx;
        self.nodes.push(node);

        idx
    }

    /// Add a child to one of the topology's nodes. This does not
    /// change the leaf slots, use [`Topology::split_leaf`] to grow a topology.
    pub fn add_child(&mut self, node: Node, parent: NodeId) -> Result<NodeId, TopologyError> {
        if parent >= self.nodes.len() {
            return Err(TopologyError::NodeNotFound(parent));
        }

        let mut node = node;
        node.set_parent(parent);

        let id = self.add(node);
        self.get_mut(&parent)?.add_child(id);

        Ok(id)
    }

    /// Get a reference to a specific Node of the topology
    pub fn get(&self, id: &NodeId) -> Result<&Node, TopologyError> {
        self.nodes.get(*id).ok_or(TopologyError::NodeNotFound(*id))
    }

    /// Get a mutable reference to a specific Node of the topology
    pub fn get_mut(&mut self, id: &NodeId) -> Result<&mut Node, TopologyError> {
        self.nodes.get_mut(*id).ok_or(TopologyError::NodeNotFound(*id))
    }

    /// Gets the root node. In the case of unrooted trees this node is a "virtual root"
    /// that has exactly 3 children.
    pub fn get_root(&self) -> Result<NodeId, TopologyError> {
        if self.nodes.is_empty() {
            return Err(TopologyError::IsEmpty);
        }
        self.nodes
            .iter()
            .filter(|&node| node.is_root())
            .map(|node| node.id)
            .next()
            .ok_or(TopologyError::RootNotFound)
    }

    /// Returns the Node IDs of the leaf slots, from left to right
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Returns the names of the leaves, from left to right
    /// ```
    /// use randtree::tree::Topology;
    ///
    /// let tree = Topology::from_newick("((C,A),B);").unwrap();
    /// let names: Vec<_> = tree.leaf_names().into_iter().flatten().collect();
    ///
    /// assert_eq!(names, vec!["C", "A", "B"]);
    /// ```
    pub fn leaf_names(&self) -> Vec<Option<String>> {
        self.leaves
            .iter()
            .filter_map(|id| self.nodes.get(*id))
            .map(|node| node.name.clone())
            .collect()
    }

    /// Returns a vector containing node ids in the same order as the
    /// [preorder](https://en.wikipedia.org/wiki/Tree_traversal#Pre-order,_NLR) tree traversal
    pub fn preorder(&self, root: &NodeId) -> Result<Vec<NodeId>, TopologyError> {
        let mut indices = vec![];
        let mut stack = vec![*root];
        while let Some(id) = stack.pop() {
            indices.push(id);
            stack.extend(self.get(&id)?.children.iter().rev());
        }

        Ok(indices)
    }
}

/// Methods that grow and label the [`Topology`]
///
/// ----
/// ----
impl Topology {
    // #########################
    // # GROWING AND LABELLING #
    // #########################

    /// Split the leaf slot at position `slot` (counted from the left) into
    /// a cherry of two new leaf slots. This is the textual equivalent of
    /// replacing the `slot`-th `#` with `(#,#)`.
    ///
    /// Returns the ids of the two new leaves.
    /// ```
    /// use randtree::tree::{Rooting, Topology};
    ///
    /// let mut tree = Topology::seed(Rooting::Rooted);
    /// tree.split_leaf(1).unwrap();
    /// assert_eq!(tree.to_newick().unwrap(), "(#,(#,#));");
    ///
    /// tree.split_leaf(0).unwrap();
    /// assert_eq!(tree.to_newick().unwrap(), "((#,#),(#,#));");
    /// ```
    pub fn split_leaf(&mut self, slot: usize) -> Result<(NodeId, NodeId), TopologyError> {
        let leaf = *self.leaves.get(slot).ok_or(TopologyError::SlotOutOfRange {
            slot,
            n_leaves: self.leaves.len(),
        })?;

        let left = self.add_child(Node::new(), leaf)?;
        let right = self.add_child(Node::new(), leaf)?;

        self.leaves[slot] = left;
        self.leaves.insert(slot + 1, right);

        Ok((left, right))
    }

    /// Grow the topology until it has `n_leaves` leaf slots. At each step
    /// with `j` slots, a slot index is drawn uniformly in `[0, j-1]` and
    /// that slot is split.
    ///
    /// Asking for as many slots as are already present is a no-op.
    pub fn grow<R>(&mut self, n_leaves: usize, rng: &mut R) -> Result<(), TopologyError>
    where
        R: Rng + ?Sized,
    {
        let current = self.n_leaves();
        if current == 0 {
            return Err(TopologyError::IsEmpty);
        }
        if n_leaves < current {
            return Err(TopologyError::TooFewLeaves {
                current,
                target: n_leaves,
            });
        }

        for j in current..n_leaves {
            let slot = rng.gen_range(0..j);
            self.split_leaf(slot)?;
        }

        Ok(())
    }

    /// Generates a random unlabelled topology with `n_leaves` leaf slots,
    /// grown from the seed of the given rooting convention.
    /// ```
    /// use rand::SeedableRng;
    /// use rand_xoshiro::Xoshiro256PlusPlus;
    /// use randtree::tree::{Rooting, Topology};
    ///
    /// let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    /// let tree = Topology::random(Rooting::Rooted, 10, &mut rng).unwrap();
    ///
    /// assert_eq!(tree.n_leaves(), 10);
    /// assert_eq!(tree.n_internal(), 9);
    /// assert!(tree.is_binary().unwrap());
    /// ```
    pub fn random<R>(rooting: Rooting, n_leaves: usize, rng: &mut R) -> Result<Self, TopologyError>
    where
        R: Rng + ?Sized,
    {
        let mut topology = Self::seed(rooting);
        topology.grow(n_leaves, rng)?;

        Ok(topology)
    }

    /// Name the leaf slots with the given labels: the k-th slot from
    /// the left gets the k-th label.
    /// ```
    /// use randtree::tree::{Rooting, Topology};
    ///
    /// let mut tree = Topology::seed(Rooting::Unrooted);
    /// tree.split_leaf(2).unwrap();
    /// tree.label_leaves(&["A", "B", "C", "D"]).unwrap();
    ///
    /// assert_eq!(tree.to_newick().unwrap(), "(A,B,(C,D));");
    /// ```
    pub fn label_leaves<S>(&mut self, labels: &[S]) -> Result<(), TopologyError>
    where
        S: AsRef<str>,
    {
        if labels.len() != self.leaves.len() {
            return Err(TopologyError::LabelCountMismatch {
                labels: labels.len(),
                slots: self.leaves.len(),
            });
        }

        for (id, label) in self.leaves.iter().zip(labels) {
            self.nodes[*id].set_name(label.as_ref().to_string());
        }

        Ok(())
    }
}

/// Methods that compute characteristics of the [`Topology`]
///
/// ----
/// ----
impl Topology {
    // ###########################################
    // # GETTING CHARACTERISTICS OF THE TOPOLOGY #
    // ###########################################

    /// Returns the number of nodes in the topology
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaf slots in the topology
    pub fn n_leaves(&self) -> usize {
        self.leaves.len()
    }

    /// Returns the number of internal nodes, root included
    pub fn n_internal(&self) -> usize {
        self.nodes.iter().filter(|node| !node.is_tip()).count()
    }

    /// Returns the number of children of the root node
    pub fn root_degree(&self) -> Result<usize, TopologyError> {
        let root = self.get_root()?;
        Ok(self.get(&root)?.children.len())
    }

    /// Infers the rooting convention from the degree of the root:
    /// 2 children means rooted, 3 children means unrooted.
    /// Any other degree does not match either convention.
    /// ```
    /// use randtree::tree::{Rooting, Topology};
    ///
    /// let tree = Topology::from_newick("((A,B),C,D);").unwrap();
    /// assert_eq!(tree.rooting().unwrap(), Some(Rooting::Unrooted));
    ///
    /// let tree = Topology::from_newick("(A,B,C,D);").unwrap();
    /// assert_eq!(tree.rooting().unwrap(), None);
    /// ```
    pub fn rooting(&self) -> Result<Option<Rooting>, TopologyError> {
        Ok(match self.root_degree()? {
            2 => Some(Rooting::Rooted),
            3 => Some(Rooting::Unrooted),
            _ => None,
        })
    }

    /// Check if the topology is binary: the root has 2 or 3 children
    /// and every other internal node has exactly 2.
    pub fn is_binary(&self) -> Result<bool, TopologyError> {
        let root = self.get_root()?;
        for node in self.nodes.iter() {
            let n_children = node.children.len();
            if node.id == root {
                if !(2..=3).contains(&n_children) {
                    return Ok(false);
                }
            } else if n_children != 0 && n_children != 2 {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Checks if all the leaves have unique names
    pub fn has_unique_tip_names(&self) -> Result<bool, TopologyError> {
        let mut names = HashSet::new();
        for id in self.leaves.iter() {
            match &self.get(id)?.name {
                Some(name) => names.insert(name),
                None => return Ok(false),
            };
        }

        Ok(names.len() == self.n_leaves())
    }
}

/// Methods to read and write [`Topology`] objects to and from files or [`String`] objects.
///
/// ----
/// ----
impl Topology {
    // #############################
    // # READ AND WRITE TOPOLOGIES #
    // #############################

    /// Generate newick representation of the subtree rooted at `root`
    fn to_newick_impl(&self, root: &NodeId) -> Result<String, TopologyError> {
        let mut newick = String::new();
        // (node, index of the next child to write)
        let mut stack = vec![(*root, 0)];
        while let Some((id, next)) = stack.pop() {
            let node = self.get(&id)?;
            if node.is_tip() {
                newick.push_str(&node.to_newick());
                continue;
            }
            if next == node.children.len() {
                newick.push(')');
                newick.push_str(&node.to_newick());
                continue;
            }

            newick.push(if next == 0 { '(' } else { ',' });
            stack.push((id, next + 1));
            stack.push((node.children[next], 0));
        }

        Ok(newick)
    }

    /// Writes the topology as a newick formatted string. Unlabelled
    /// leaf slots are written as `#`.
    /// ```
    /// use randtree::tree::Topology;
    ///
    /// let newick = "((A,B),(C,#));";
    /// let tree = Topology::from_newick(newick).unwrap();
    ///
    /// assert_eq!(tree.to_newick().unwrap(), newick);
    /// ```
    pub fn to_newick(&self) -> Result<String, TopologyError> {
        let root = self.get_root()?;
        Ok(self.to_newick_impl(&root)? + ";")
    }

    /// Read a newick formatted string and build a [`Topology`] from it.
    /// Only node names are supported, a leaf named `#` is read as an
    /// unlabelled slot.
    /// ```
    /// use randtree::tree::Topology;
    ///
    /// let tree = Topology::from_newick("(A,B,(C,D)E);").unwrap();
    ///
    /// assert_eq!(tree.size(), 6);
    /// assert_eq!(tree.n_leaves(), 4);
    /// assert_eq!(tree.root_degree().unwrap(), 3);
    /// ```
    pub fn from_newick(newick: &str) -> Result<Self, NewickParseError> {
        let mut tree = Topology::new();

        let mut current_name: Option<String> = None;
        let mut current_index: Option<NodeId> = None;
        let mut parent_stack: Vec<NodeId> = Vec::new();
        let mut finished = false;

        let mut name_ended = false;

        for c in newick.chars() {
            if c.is_whitespace() {
                name_ended = current_name.is_some();
                continue;
            }
            if finished {
                return Err(NewickParseError::TrailingCharacters);
            }
            let blank_in_name = std::mem::take(&mut name_ended);

            match c {
                '(' => {
                    // Start subtree
                    if let Some(name) = current_name.take() {
                        return Err(NewickParseError::UnexpectedName(name));
                    }
                    let id = match parent_stack.last() {
                        None if tree.size() > 0 => {
                            return Err(NewickParseError::TrailingCharacters)
                        }
                        None => tree.add(Node::new()),
                        Some(_) if current_index.is_some() => {
                            return Err(NewickParseError::MissingComma)
                        }
                        Some(parent) => tree.add_child(Node::new(), *parent)?,
                    };
                    parent_stack.push(id);
                }
                ',' | ')' => {
                    // Close current sibling, which is either a finished subtree or a leaf
                    let parent = *parent_stack
                        .last()
                        .ok_or(NewickParseError::UnopenedBracket)?;
                    let name = current_name.take().filter(|name| !is_placeholder(name));
                    match current_index.take() {
                        Some(index) => tree.get_mut(&index)?.name = name,
                        None => {
                            let mut leaf = Node::new();
                            leaf.name = name;
                            tree.add_child(leaf, parent)?;
                        }
                    }
                    if c == ')' {
                        current_index = parent_stack.pop();
                    }
                }
                ';' => {
                    if !parent_stack.is_empty() {
                        return Err(NewickParseError::UnclosedBracket);
                    }
                    let name = current_name.take().filter(|name| !is_placeholder(name));
                    match current_index.take() {
                        Some(index) => tree.get_mut(&index)?.name = name,
                        None => match name {
                            Some(name) => {
                                tree.add(Node::new_named(&name));
                            }
                            None => return Err(NewickParseError::EmptyTree),
                        },
                    }
                    finished = true;
                }
                ':' => return Err(NewickParseError::BranchLengthsUnsupported),
                _ if blank_in_name => {
                    return Err(NewickParseError::UnexpectedName(
                        current_name.take().unwrap_or_default(),
                    ))
                }
                _ => current_name.get_or_insert_with(String::new).push(c),
            }
        }

        if !finished {
            return match parent_stack.is_empty() {
                true => Err(NewickParseError::NoClosingSemicolon),
                false => Err(NewickParseError::UnclosedBracket),
            };
        }

        let root = tree.get_root()?;
        tree.leaves = tree
            .preorder(&root)?
            .into_iter()
            .filter(|id| tree.nodes[*id].is_tip())
            .collect();

        Ok(tree)
    }

    /// Reads every tree of a newick file, one tree per non-empty line
    pub fn from_file(path: &Path) -> Result<Vec<Self>, NewickParseError> {
        fs::read_to_string(path)?
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Self::from_newick)
            .collect()
    }
}

fn is_placeholder(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some(PLACEHOLDER) && chars.next().is_none()
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    /// Split the `slot`-th placeholder of a skeleton string by rescanning it
    fn split_skeleton(skeleton: &str, slot: usize) -> String {
        let mut out = String::with_capacity(skeleton.len() + 4);
        let mut count = 0;
        for c in skeleton.chars() {
            if c != PLACEHOLDER {
                out.push(c);
                continue;
            }
            if count == slot {
                out.push_str("(#,#)");
            } else {
                out.push(c);
            }
            count += 1;
        }
        out
    }

    #[test]
    fn seeds() {
        let rooted = Topology::seed(Rooting::Rooted);
        assert_eq!(rooted.n_leaves(), 2);
        assert_eq!(rooted.n_internal(), 1);
        assert_eq!(rooted.rooting().unwrap(), Some(Rooting::Rooted));

        let unrooted = Topology::seed(Rooting::Unrooted);
        assert_eq!(unrooted.n_leaves(), 3);
        assert_eq!(unrooted.n_internal(), 1);
        assert_eq!(unrooted.rooting().unwrap(), Some(Rooting::Unrooted));
    }

    #[test]
    fn split_matches_skeleton_rescan() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1234);
        for rooting in [Rooting::Rooted, Rooting::Unrooted] {
            let mut tree = Topology::seed(rooting);
            let mut skeleton = tree.to_newick().unwrap();
            for j in rooting.seed_tips()..60 {
                let slot = rng.gen_range(0..j);
                tree.split_leaf(slot).unwrap();
                skeleton = split_skeleton(&skeleton, slot);
                assert_eq!(tree.to_newick().unwrap(), skeleton);
                assert_eq!(tree.n_leaves(), j + 1);
            }
        }
    }

    #[test]
    fn split_out_of_range() {
        let mut tree = Topology::seed(Rooting::Rooted);
        assert!(matches!(
            tree.split_leaf(2),
            Err(TopologyError::SlotOutOfRange {
                slot: 2,
                n_leaves: 2
            })
        ));
    }

    #[test]
    fn grow_counts() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        for n in 3..40 {
            let tree = Topology::random(Rooting::Rooted, n, &mut rng).unwrap();
            assert_eq!(tree.n_leaves(), n);
            assert_eq!(tree.n_internal(), n - 1);
            assert_eq!(tree.root_degree().unwrap(), 2);
            assert!(tree.is_binary().unwrap());

            let tree = Topology::random(Rooting::Unrooted, n, &mut rng).unwrap();
            assert_eq!(tree.n_leaves(), n);
            assert_eq!(tree.n_internal(), n - 2);
            assert_eq!(tree.root_degree().unwrap(), 3);
            assert!(tree.is_binary().unwrap());
        }
    }

    #[test]
    fn grow_to_seed_size_is_noop() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let tree = Topology::random(Rooting::Unrooted, 3, &mut rng).unwrap();
        assert_eq!(tree.to_newick().unwrap(), "(#,#,#);");
    }

    #[test]
    fn grow_cannot_shrink() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        assert!(matches!(
            Topology::random(Rooting::Unrooted, 2, &mut rng),
            Err(TopologyError::TooFewLeaves {
                current: 3,
                target: 2
            })
        ));
        assert!(matches!(
            Topology::new().grow(4, &mut rng),
            Err(TopologyError::IsEmpty)
        ));
    }

    #[test]
    fn label_count_mismatch() {
        let mut tree = Topology::seed(Rooting::Unrooted);
        assert!(matches!(
            tree.label_leaves(&["A", "B"]),
            Err(TopologyError::LabelCountMismatch {
                labels: 2,
                slots: 3
            })
        ));
        assert!(tree.leaf_names().iter().all(Option::is_none));
    }

    #[test]
    fn unique_tip_names() {
        let tree = Topology::from_newick("((A,B),C);").unwrap();
        assert!(tree.has_unique_tip_names().unwrap());

        let tree = Topology::from_newick("((A,B),A);").unwrap();
        assert!(!tree.has_unique_tip_names().unwrap());

        let tree = Topology::from_newick("((A,#),C);").unwrap();
        assert!(!tree.has_unique_tip_names().unwrap());
    }

    #[test]
    fn read_newick() {
        let newicks = [
            "(A,B);",
            "((A,B),C);",
            "(A,(B,C),(D,(E,F)));",
            "((A,B)ab,C)root;",
            "(#,(#,#));",
            "A;",
        ];
        for newick in newicks {
            let tree = Topology::from_newick(newick).unwrap();
            assert_eq!(tree.to_newick().unwrap(), newick);
        }

        let tree = Topology::from_newick(" ( A , ( B ,C ) ) ;\n").unwrap();
        assert_eq!(tree.to_newick().unwrap(), "(A,(B,C));");
    }

    #[test]
    fn read_newick_fails() {
        assert!(matches!(
            Topology::from_newick("((A,B),C"),
            Err(NewickParseError::UnclosedBracket)
        ));
        assert!(matches!(
            Topology::from_newick("((A,B),C;"),
            Err(NewickParseError::UnclosedBracket)
        ));
        assert!(matches!(
            Topology::from_newick("((A,B),C)"),
            Err(NewickParseError::NoClosingSemicolon)
        ));
        assert!(matches!(
            Topology::from_newick("(A,B));"),
            Err(NewickParseError::UnopenedBracket)
        ));
        assert!(matches!(
            Topology::from_newick("(A,B);(C,D);"),
            Err(NewickParseError::TrailingCharacters)
        ));
        assert!(matches!(
            Topology::from_newick("(A,B)(C,D);"),
            Err(NewickParseError::TrailingCharacters)
        ));
        assert!(matches!(
            Topology::from_newick("(A:0.1,B:0.2);"),
            Err(NewickParseError::BranchLengthsUnsupported)
        ));
        assert!(matches!(
            Topology::from_newick(";"),
            Err(NewickParseError::EmptyTree)
        ));
    }

    #[test]
    fn names_must_end_subtrees() {
        for (newick, stray) in [
            ("(A(B,C));", "A"),
            ("A(B,C);", "A"),
            ("((A,B)C(D,E));", "C"),
            ("(A B,C);", "A"),
            ("((A,B)ab cd,C);", "ab"),
        ] {
            match Topology::from_newick(newick) {
                Err(NewickParseError::UnexpectedName(name)) => {
                    assert_eq!(name, stray, "{newick}")
                }
                other => panic!("{newick} should be rejected, got {other:?}"),
            }
        }
        assert!(matches!(
            Topology::from_newick("((A,B)(C,D));"),
            Err(NewickParseError::MissingComma)
        ));

        let tree = Topology::from_newick("( (A,B) ab , C ) root ;").unwrap();
        assert_eq!(tree.to_newick().unwrap(), "((A,B)ab,C)root;");
    }

    #[test]
    fn deep_caterpillar() {
        let depth = 200_000;
        let mut newick = "(".repeat(depth);
        newick.push_str("T0");
        for i in 1..=depth {
            newick.push_str(&format!(",T{i})"));
        }
        newick.push(';');

        let tree = Topology::from_newick(&newick).unwrap();
        assert_eq!(tree.n_leaves(), depth + 1);
        assert_eq!(tree.n_internal(), depth);
        assert!(tree.is_binary().unwrap());
        assert_eq!(tree.to_newick().unwrap(), newick);

        let mut tree = Topology::seed(Rooting::Rooted);
        for slot in 1..depth {
            tree.split_leaf(slot).unwrap();
        }
        let root = tree.get_root().unwrap();
        assert_eq!(tree.preorder(&root).unwrap().len(), tree.size());
        assert_eq!(tree.to_newick().unwrap().matches('(').count(), depth);
    }

    #[test]
    fn non_binary_topologies() {
        for newick in ["(A,B,C,D);", "((A,B,C),D);", "((A),B);", "A;"] {
            let tree = Topology::from_newick(newick).unwrap();
            assert!(!tree.is_binary().unwrap(), "{newick} is not binary");
        }
    }
}
