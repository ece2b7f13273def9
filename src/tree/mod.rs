//! Build unlabelled binary topologies and write them as Newick trees.
//!
//! This module defines the two structs used to represent a growing tree:
//!  - The [`Node`] struct that represents a node of the topology.
//!  - The [`Topology`] struct that holds a collection of [`Node`] objects
//!    along with the ordered list of its leaf slots.
//!

mod node;
mod topology;

use std::fmt::Display;

use clap::ValueEnum;

pub use self::node::Node;
pub use self::topology::{NewickParseError, Topology, TopologyError};

/// A type that represents Identifiers of [`Node`] objects
/// within a [`Topology`] object.
pub type NodeId = usize;

/// Symbol used for unlabelled leaf slots when writing a skeleton topology.
pub const PLACEHOLDER: char = '#';

/// Rooting convention of generated trees
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Rooting {
    /// Rooted trees, grown from the two-leaf seed `(#,#);`
    #[value(alias = "r")]
    Rooted,
    /// Unrooted trees, grown from the trifurcating seed `(#,#,#);`
    #[value(alias = "u")]
    Unrooted,
}

impl Rooting {
    /// Number of leaf slots in the seed topology, which is also
    /// the number of children of the root node.
    /// ```
    /// use randtree::tree::Rooting;
    ///
    /// assert_eq!(Rooting::Rooted.seed_tips(), 2);
    /// assert_eq!(Rooting::Unrooted.seed_tips(), 3);
    /// ```
    pub fn seed_tips(&self) -> usize {
        match self {
            Rooting::Rooted => 2,
            Rooting::Unrooted => 3,
        }
    }
}

impl Display for Rooting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rooting::Rooted => write!(f, "rooted"),
            Rooting::Unrooted => write!(f, "unrooted"),
        }
    }
}
