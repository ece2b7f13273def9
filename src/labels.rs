//! Randomly assign taxon labels to the leaf slots of a topology.

use rand::{seq::SliceRandom, Rng};

use crate::taxa::TaxonSet;
use crate::tree::{Topology, TopologyError};

/// Returns a shuffled copy of the labels. The permutation is drawn with
/// Fisher-Yates, the input order is left untouched.
/// ```
/// use rand::SeedableRng;
/// use rand_xoshiro::Xoshiro256PlusPlus;
/// use randtree::labels::shuffle_labels;
///
/// let labels = ["A", "B", "C", "D"];
/// let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
/// let mut shuffled = shuffle_labels(&labels, &mut rng);
///
/// shuffled.sort();
/// assert_eq!(shuffled, labels);
/// ```
pub fn shuffle_labels<'a, S, R>(labels: &'a [S], rng: &mut R) -> Vec<&'a str>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut order: Vec<&str> = labels.iter().map(|label| label.as_ref()).collect();
    order.shuffle(rng);

    order
}

/// Label the leaf slots of a grown topology with a random permutation
/// of the taxa and returns the resulting newick string.
///
/// The topology must have exactly one leaf slot per taxon.
pub fn label_topology<R>(
    topology: &mut Topology,
    taxa: &TaxonSet,
    rng: &mut R,
) -> Result<String, TopologyError>
where
    R: Rng + ?Sized,
{
    if topology.n_leaves() != taxa.len() {
        return Err(TopologyError::LabelCountMismatch {
            labels: taxa.len(),
            slots: topology.n_leaves(),
        });
    }

    let order = shuffle_labels(taxa.labels(), rng);
    topology.label_leaves(&order)?;

    topology.to_newick()
}
