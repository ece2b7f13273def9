#![warn(missing_docs)]

//! Generate random rooted or unrooted binary trees over a fixed set of taxa.
//!
//! Each tree is built in two steps:
//!  - an unlabelled [`Topology`](tree::Topology) is grown from a seed
//!    (`(#,#);` for rooted trees, `(#,#,#);` for unrooted trees) by
//!    repeatedly splitting a uniformly drawn leaf slot into a cherry,
//!    until there is one slot per taxon.
//!  - the taxa are shuffled and placed on the leaf slots from left to right.
//!
//! A [`TreeGenerator`] owns the random number generator, so that every
//! draw of a run comes from the same stream and a run is reproducible
//! from its seed.
//!
//! ```
//! use randtree::{taxa::TaxonSet, tree::Rooting, TreeGenerator};
//!
//! let taxa = TaxonSet::new(["A", "B", "C", "D", "E"]).unwrap();
//! let mut generator = TreeGenerator::from_seed(42, Rooting::Rooted, taxa).unwrap();
//!
//! let trees = generator.generate(3).unwrap();
//! assert_eq!(trees.len(), 3);
//! assert!(trees.iter().all(|tree| tree.ends_with(';')));
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use thiserror::Error;
use tracing::debug;

use taxa::TaxonSet;
use tree::{Rooting, Topology, TopologyError};

pub mod labels;
pub mod output;
pub mod taxa;
pub mod tree;

/// Errors that can occur when generating trees
#[derive(Error, Debug)]
pub enum GenerateError {
    /// There are fewer taxa than leaf slots in the seed topology
    #[error("Generating {rooting} trees requires at least {min} taxa, got {n_taxa}.")]
    TooFewTaxa {
        /// Requested rooting convention
        rooting: Rooting,
        /// Minimum number of taxa for this rooting
        min: usize,
        /// Number of taxa given
        n_taxa: usize,
    },
    /// There was a [`TopologyError`] when growing or labelling a tree
    #[error("Could not build tree")]
    TopologyError(#[from] TopologyError),
}

/// Generates random labelled trees, all with the same rooting and taxa.
///
/// Every random draw, to grow topologies and to shuffle taxa,
/// is taken from the single generator `rng` in program order.
#[derive(Debug, Clone)]
pub struct TreeGenerator<R> {
    rng: R,
    rooting: Rooting,
    taxa: TaxonSet,
    generated: usize,
}

impl TreeGenerator<Xoshiro256PlusPlus> {
    /// Creates a generator backed by a [`Xoshiro256PlusPlus`] stream
    /// seeded with `seed`. The same seed always produces the same trees.
    pub fn from_seed(seed: u64, rooting: Rooting, taxa: TaxonSet) -> Result<Self, GenerateError> {
        Self::new(Xoshiro256PlusPlus::seed_from_u64(seed), rooting, taxa)
    }
}

impl<R: Rng> TreeGenerator<R> {
    /// Creates a generator, checking that there are enough taxa
    /// to fill the seed topology of the rooting convention.
    /// ```
    /// use rand::thread_rng;
    /// use randtree::{taxa::TaxonSet, tree::Rooting, GenerateError, TreeGenerator};
    ///
    /// let taxa = TaxonSet::new(["A", "B"]).unwrap();
    /// assert!(TreeGenerator::new(thread_rng(), Rooting::Rooted, taxa.clone()).is_ok());
    ///
    /// let res = TreeGenerator::new(thread_rng(), Rooting::Unrooted, taxa);
    /// assert!(matches!(res, Err(GenerateError::TooFewTaxa { min: 3, n_taxa: 2, .. })));
    /// ```
    pub fn new(rng: R, rooting: Rooting, taxa: TaxonSet) -> Result<Self, GenerateError> {
        let min = rooting.seed_tips();
        if taxa.len() < min {
            return Err(GenerateError::TooFewTaxa {
                rooting,
                min,
                n_taxa: taxa.len(),
            });
        }

        Ok(Self {
            rng,
            rooting,
            taxa,
            generated: 0,
        })
    }

    /// Rooting convention of the generated trees
    pub fn rooting(&self) -> Rooting {
        self.rooting
    }

    /// Taxa placed on the generated trees
    pub fn taxa(&self) -> &TaxonSet {
        &self.taxa
    }

    /// Number of trees generated so far
    pub fn generated(&self) -> usize {
        self.generated
    }

    /// Generates the next random tree as a newick string
    pub fn next_tree(&mut self) -> Result<String, GenerateError> {
        let mut topology = Topology::random(self.rooting, self.taxa.len(), &mut self.rng)?;
        let newick = labels::label_topology(&mut topology, &self.taxa, &mut self.rng)?;

        self.generated += 1;
        debug!(tree = self.generated, %newick, "Generated tree");

        Ok(newick)
    }

    /// Generates `n` trees. Either all trees are returned or the first error is.
    pub fn generate(&mut self, n: usize) -> Result<Vec<String>, GenerateError> {
        debug!(
            n_trees = n,
            rooting = %self.rooting,
            n_taxa = self.taxa.len(),
            "Generating trees"
        );
        (0..n).map(|_| self.next_tree()).collect()
    }
}

impl<R: Rng> Iterator for TreeGenerator<R> {
    type Item = Result<String, GenerateError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_tree())
    }
}

/// Generates `n` random trees over `taxa` from the given seed.
/// ```
/// use randtree::{generate_trees, taxa::TaxonSet, tree::Rooting};
///
/// let taxa = TaxonSet::new(["A", "B", "C"]).unwrap();
/// let trees = generate_trees(&taxa, Rooting::Unrooted, 4, 7).unwrap();
///
/// assert_eq!(trees.len(), 4);
/// assert_eq!(trees, generate_trees(&taxa, Rooting::Unrooted, 4, 7).unwrap());
/// ```
pub fn generate_trees(
    taxa: &TaxonSet,
    rooting: Rooting,
    n: usize,
    seed: u64,
) -> Result<Vec<String>, GenerateError> {
    TreeGenerator::from_seed(seed, rooting, taxa.clone())?.generate(n)
}

/// Returns a seed derived from the system clock
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn taxa(n: usize) -> TaxonSet {
        TaxonSet::new((1..=n).map(|i| format!("Taxon_{i}"))).unwrap()
    }

    fn check_tree(newick: &str, taxa: &TaxonSet, rooting: Rooting) {
        assert!(newick.ends_with(';'));
        assert_eq!(newick.matches('(').count(), newick.matches(')').count());

        let tree = Topology::from_newick(newick).unwrap();
        assert_eq!(tree.n_leaves(), taxa.len());
        assert!(tree.is_binary().unwrap());
        assert!(tree.has_unique_tip_names().unwrap());
        assert_eq!(tree.rooting().unwrap(), Some(rooting));

        let mut names: Vec<_> = tree.leaf_names().into_iter().flatten().collect();
        names.sort();
        let mut expected = taxa.labels().to_vec();
        expected.sort();
        assert_eq!(names, expected);

        let expected_internal = match rooting {
            Rooting::Rooted => taxa.len() - 1,
            Rooting::Unrooted => taxa.len() - 2,
        };
        assert_eq!(tree.n_internal(), expected_internal);
    }

    #[test]
    fn five_taxa_rooted() {
        let taxa = TaxonSet::new(["A", "B", "C", "D", "E"]).unwrap();
        let trees = generate_trees(&taxa, Rooting::Rooted, 1, 2019).unwrap();

        assert_eq!(trees.len(), 1);
        check_tree(&trees[0], &taxa, Rooting::Rooted);
        let tree = Topology::from_newick(&trees[0]).unwrap();
        assert_eq!(tree.n_internal(), 4);
    }

    #[test]
    fn three_taxa_unrooted_is_the_seed() {
        let taxa = TaxonSet::new(["A", "B", "C"]).unwrap();
        let trees = generate_trees(&taxa, Rooting::Unrooted, 1, 2019).unwrap();

        let tree = Topology::from_newick(&trees[0]).unwrap();
        assert_eq!(tree.size(), 4);
        assert_eq!(tree.root_degree().unwrap(), 3);

        let skeleton: String = trees[0]
            .chars()
            .map(|c| if "ABC".contains(c) { '#' } else { c })
            .collect();
        assert_eq!(skeleton, "(#,#,#);");
    }

    #[test]
    fn two_taxa_rooted() {
        let taxa = TaxonSet::new(["A", "B"]).unwrap();
        for tree in generate_trees(&taxa, Rooting::Rooted, 20, 1).unwrap() {
            assert!(tree == "(A,B);" || tree == "(B,A);");
        }
    }

    #[test]
    fn many_trees_many_taxa() {
        let taxa = taxa(50);
        for rooting in [Rooting::Rooted, Rooting::Unrooted] {
            let trees = generate_trees(&taxa, rooting, 2000, 99).unwrap();
            assert_eq!(trees.len(), 2000);
            for tree in trees.iter() {
                check_tree(tree, &taxa, rooting);
            }
        }
    }

    #[test]
    fn same_seed_same_trees() {
        let taxa = taxa(12);
        let first = generate_trees(&taxa, Rooting::Unrooted, 50, 123).unwrap();
        let second = generate_trees(&taxa, Rooting::Unrooted, 50, 123).unwrap();
        assert_eq!(first, second);

        let other = generate_trees(&taxa, Rooting::Unrooted, 50, 124).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn stream_is_not_reseeded_per_tree() {
        let taxa = taxa(10);
        let trees = generate_trees(&taxa, Rooting::Rooted, 30, 8).unwrap();
        let first = &trees[0];
        assert!(trees.iter().skip(1).any(|tree| tree != first));
    }

    #[test]
    fn iterator_matches_generate() {
        let mut generator = TreeGenerator::from_seed(3, Rooting::Rooted, taxa(6)).unwrap();
        let from_iter: Vec<_> = generator
            .by_ref()
            .take(10)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(generator.generated(), 10);
        assert_eq!(from_iter, generate_trees(&taxa(6), Rooting::Rooted, 10, 3).unwrap());
    }

    #[test]
    fn zero_trees() {
        assert!(generate_trees(&taxa(4), Rooting::Rooted, 0, 1)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn too_few_taxa() {
        let res = generate_trees(&taxa(2), Rooting::Unrooted, 5, 1);
        assert!(matches!(
            res,
            Err(GenerateError::TooFewTaxa {
                rooting: Rooting::Unrooted,
                min: 3,
                n_taxa: 2
            })
        ));
    }

    proptest! {
        #[test]
        fn generated_trees_are_valid(
            n_taxa in 3usize..60,
            unrooted in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let rooting = if unrooted { Rooting::Unrooted } else { Rooting::Rooted };
            let taxa = taxa(n_taxa);
            for tree in generate_trees(&taxa, rooting, 5, seed).unwrap() {
                check_tree(&tree, &taxa, rooting);
            }
        }
    }
}
