use tracing::{debug, trace};

use super::Levels;
use crate::{hash::HashAdapter, Error, FieldElement, Proof, Result, TreeConfig};

/// An append-only Merkle tree that grows one leaf at a time
///
/// Each insert only rehashes the path from the new leaf to the root. Siblings that haven't been
/// filled yet are the empty subtree values from [`HashAdapter::zero_elements`], so the root is
/// always the same as a [`FixedDepthTree`] built from the same leaves.
///
/// ```rust
/// # use accumulator::*;
/// # use accumulator::hash::{HashAdapter, Poseidon};
/// let config = TreeConfig::new(4, 3).unwrap();
/// let hasher = HashAdapter::for_config(Poseidon::init(), &config).unwrap();
///
/// let mut tree = IncrementalTree::new(&config, &hasher).unwrap();
/// let empty_root = tree.root().clone();
///
/// assert_eq!(tree.insert(FieldElement::from(10u64)).unwrap(), 0);
/// assert_eq!(tree.insert(FieldElement::from(20u64)).unwrap(), 1);
///
/// assert_ne!(*tree.root(), empty_root);
/// assert!(verify(&tree.proof(1).unwrap(), &hasher, &config));
/// ```
///
/// [`FixedDepthTree`]: crate::FixedDepthTree
#[derive(Debug, Clone)]
pub struct IncrementalTree {
    config: TreeConfig,
    hasher: HashAdapter,
    levels: Levels,
}

impl IncrementalTree {
    /// Create an empty tree, whose root is the empty subtree value at the top level
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `hasher` was made for a different arity
    pub fn new(config: &TreeConfig, hasher: &HashAdapter) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            hasher: hasher.clone(),
            levels: Levels::empty(config, hasher)?,
        })
    }

    /// Append a leaf, returning its index
    ///
    /// The new path is hashed in full before anything is written, so a failed insert leaves the
    /// tree as it was
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if the tree is full
    #[tracing::instrument(level = "trace", skip(self), fields(index = self.len()))]
    pub fn insert(&mut self, leaf: FieldElement) -> Result<usize> {
        let index = self.len();

        if index >= self.capacity() {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity(),
                requested: index + 1,
            });
        }

        let arity = self.config.arity();
        let mut updates = Vec::with_capacity(self.config.depth() + 1);
        let mut current = leaf;
        let mut position = index;

        for level in 0..self.config.depth() {
            let mut children = self.levels.block(level, position);
            children[position % arity] = current.clone();

            let parent = self.hasher.node_hash(&children)?;
            updates.push((level, position, current));

            current = parent;
            position /= arity;
        }

        updates.push((self.config.depth(), position, current));

        for (level, position, value) in updates {
            self.levels.set(level, position, value);
        }

        trace!(root = %self.root(), "inserted leaf");

        Ok(index)
    }

    /// Append every leaf from `leaves`, in order
    ///
    /// # Errors
    ///
    /// Stops at the first leaf that can't be inserted. Leaves before it stay in the tree
    pub fn extend<I>(&mut self, leaves: I) -> Result<()>
    where
        I: IntoIterator<Item = FieldElement>,
    {
        let before = self.len();

        for leaf in leaves {
            self.insert(leaf)?;
        }

        debug!(inserted = self.len() - before, root = %self.root(), "extended incremental tree");

        Ok(())
    }

    /// Generate a proof for the leaf at `index`
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if nothing has been inserted at `index` yet
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn proof(&self, index: usize) -> Result<Proof> {
        self.levels.proof(index)
    }

    /// The current root
    #[must_use]
    pub fn root(&self) -> &FieldElement {
        self.levels.root()
    }

    /// The leaves inserted so far
    #[must_use]
    pub fn leaves(&self) -> &[FieldElement] {
        self.levels.leaves()
    }

    /// The config of this tree
    #[must_use]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The hasher this tree was created with
    #[must_use]
    pub fn hasher(&self) -> &HashAdapter {
        &self.hasher
    }

    /// The number of leaves inserted so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    /// Whether nothing has been inserted yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves().is_empty()
    }

    /// The maximum number of leaves, `arity ^ depth`
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }
}
