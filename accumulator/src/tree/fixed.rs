use tracing::debug;

use super::Levels;
use crate::{hash::HashAdapter, Error, FieldElement, Proof, Result, TreeConfig};

/// A Merkle tree built in one go from a complete list of leaves
///
/// Unused leaf slots are padded with the config's zero sentinel, and every level is hashed in
/// contiguous blocks of `arity` nodes. Once built, the tree can't be changed.
///
/// ```rust
/// # use accumulator::*;
/// # use accumulator::hash::{HashAdapter, Poseidon};
/// let config = TreeConfig::new(3, 2).unwrap();
/// let hasher = HashAdapter::for_config(Poseidon::init(), &config).unwrap();
/// let leaves = vec![FieldElement::from(1u64), FieldElement::from(2u64)];
///
/// let tree = FixedDepthTree::build(leaves, &config, &hasher).unwrap();
/// let proof = tree.proof(&FieldElement::from(2u64)).unwrap();
///
/// assert_eq!(proof.root(), tree.root());
/// assert_eq!(proof.path_indices(), &[1, 0, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct FixedDepthTree {
    config: TreeConfig,
    hasher: HashAdapter,
    levels: Levels,
}

impl FixedDepthTree {
    /// Build a tree over `leaves`, in order
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if there are more leaves than `arity ^ depth`, or
    /// [`Error::InvalidConfig`] if `hasher` was made for a different arity
    #[tracing::instrument(level = "debug", skip_all, fields(leaves = leaves.len(), depth = config.depth(), arity = config.arity()))]
    pub fn build(
        leaves: Vec<FieldElement>,
        config: &TreeConfig,
        hasher: &HashAdapter,
    ) -> Result<Self> {
        if leaves.len() > config.capacity() {
            return Err(Error::CapacityExceeded {
                capacity: config.capacity(),
                requested: leaves.len(),
            });
        }

        let mut levels = Levels::empty(config, hasher)?;
        levels.nodes[0] = leaves;

        for level in 0..config.depth() {
            let zero = &levels.zeros[level];
            let parents = levels.nodes[level]
                .chunks(config.arity())
                .map(|chunk| {
                    let mut children = chunk.to_vec();
                    children.resize(config.arity(), zero.clone());
                    hasher.node_hash(&children)
                })
                .collect::<Result<Vec<_>>>()?;

            levels.nodes[level + 1] = parents;
        }

        debug!(root = %levels.root(), "built fixed-depth tree");

        Ok(Self {
            config: config.clone(),
            hasher: hasher.clone(),
            levels,
        })
    }

    /// Generate a proof for the first leaf equal to `leaf`
    ///
    /// If the same value was inserted more than once, the earliest position is proven
    ///
    /// # Errors
    ///
    /// Returns [`Error::LeafNotFound`] if no leaf has this value
    pub fn proof(&self, leaf: &FieldElement) -> Result<Proof> {
        let index = self
            .leaves()
            .iter()
            .position(|candidate| candidate == leaf)
            .ok_or_else(|| Error::LeafNotFound { leaf: leaf.clone() })?;

        self.proof_at(index)
    }

    /// Generate a proof for the leaf at `index`
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not less than [`FixedDepthTree::len`]
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn proof_at(&self, index: usize) -> Result<Proof> {
        self.levels.proof(index)
    }

    /// The root of the tree
    #[must_use]
    pub fn root(&self) -> &FieldElement {
        self.levels.root()
    }

    /// The leaves the tree was built from, without padding
    #[must_use]
    pub fn leaves(&self) -> &[FieldElement] {
        self.levels.leaves()
    }

    /// The config this tree was built with
    #[must_use]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The hasher this tree was built with
    #[must_use]
    pub fn hasher(&self) -> &HashAdapter {
        &self.hasher
    }

    /// The number of leaves, not counting padding
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    /// Whether the tree was built from an empty list
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves().is_empty()
    }
}
