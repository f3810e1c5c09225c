use std::iter::zip;

use serde::{Deserialize, Serialize};

use crate::{hash::HashAdapter, Error, FieldElement, Result, TreeConfig};

mod tamper;
pub use tamper::Tamper;

/// An inclusion proof: the siblings along the path from a leaf to the root
///
/// Both tree types produce proofs of the same shape, so a proof from a [`FixedDepthTree`] and one
/// from an [`IncrementalTree`] over the same leaves are equal.
///
/// The path is stored bottom-up. At each level, `path_elements[level]` holds the `arity - 1`
/// siblings of the path node in block order (with the path node itself removed), and
/// `path_indices[level]` is where the path node sits in its block.
///
/// [`FixedDepthTree`]: crate::FixedDepthTree
/// [`IncrementalTree`]: crate::IncrementalTree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Proof {
    leaf: FieldElement,
    leaf_index: usize,
    path_elements: Vec<Vec<FieldElement>>,
    path_indices: Vec<usize>,
    root: FieldElement,
}

impl Proof {
    pub(crate) fn new(
        leaf: FieldElement,
        leaf_index: usize,
        path_elements: Vec<Vec<FieldElement>>,
        path_indices: Vec<usize>,
        root: FieldElement,
    ) -> Self {
        Self {
            leaf,
            leaf_index,
            path_elements,
            path_indices,
            root,
        }
    }

    /// The leaf this proof is for
    #[inline]
    #[must_use]
    pub fn leaf(&self) -> &FieldElement {
        &self.leaf
    }

    /// The position of the leaf on the bottom level of the tree
    #[inline]
    #[must_use]
    pub fn leaf_index(&self) -> usize {
        self.leaf_index
    }

    /// The siblings at each level, from the leaves up
    #[inline]
    #[must_use]
    pub fn path_elements(&self) -> &[Vec<FieldElement>] {
        &self.path_elements
    }

    /// The position of the path node within its block at each level, from the leaves up
    #[inline]
    #[must_use]
    pub fn path_indices(&self) -> &[usize] {
        &self.path_indices
    }

    /// The root of the tree when the proof was generated
    #[inline]
    #[must_use]
    pub fn root(&self) -> &FieldElement {
        &self.root
    }

    /// The number of levels the proof spans
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path_indices.len()
    }

    /// Serialize to a compact binary (msgpack) representation
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProofFormat`] if encoding fails
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self).map_err(|e| Error::ProofFormat(e.to_string()))
    }

    /// Deserialize from the representation produced by [`Proof::to_bytes`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProofFormat`] if the bytes are not a valid proof
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::ProofFormat(e.to_string()))
    }

    /// Check that the proof has the shape of a path through a tree with this config
    pub(crate) fn check_shape(&self, config: &TreeConfig) -> Result<()> {
        if self.path_elements.len() != config.depth() || self.path_indices.len() != config.depth()
        {
            return Err(Error::ProofFormat(format!(
                "expected {} levels, got {} path elements and {} path indices",
                config.depth(),
                self.path_elements.len(),
                self.path_indices.len()
            )));
        }

        for (level, (siblings, &position)) in
            zip(&self.path_elements, &self.path_indices).enumerate()
        {
            if siblings.len() != config.arity() - 1 {
                return Err(Error::ProofFormat(format!(
                    "level {level} has {} siblings, expected {}",
                    siblings.len(),
                    config.arity() - 1
                )));
            }

            if position >= config.arity() {
                return Err(Error::ProofFormat(format!(
                    "level {level} has path index {position}, which is not less than the arity {}",
                    config.arity()
                )));
            }
        }

        Ok(())
    }
}

/// The leaf position encoded by a list of path indices, least significant level first
///
/// Saturates rather than overflowing, since the indices may not have been validated yet
pub(crate) fn leaf_index(path_indices: &[usize], arity: usize) -> usize {
    path_indices.iter().rev().fold(0, |index: usize, &position| {
        index.saturating_mul(arity).saturating_add(position)
    })
}

/// Replay the proof from its leaf, returning the root it leads to
///
/// This doesn't compare the result against [`Proof::root`], see [`verify`] for that
///
/// # Errors
///
/// Returns [`Error::ProofFormat`] if the path elements and indices don't line up, or any error
/// from [`HashAdapter::node_hash`]
pub fn compute_root(proof: &Proof, hasher: &HashAdapter) -> Result<FieldElement> {
    if proof.path_elements.len() != proof.path_indices.len() {
        return Err(Error::ProofFormat(format!(
            "{} path elements but {} path indices",
            proof.path_elements.len(),
            proof.path_indices.len()
        )));
    }

    let mut current = proof.leaf.clone();

    for (siblings, &position) in zip(&proof.path_elements, &proof.path_indices) {
        if position > siblings.len() {
            return Err(Error::ProofFormat(format!(
                "path index {position} is outside a block of {} nodes",
                siblings.len() + 1
            )));
        }

        let mut children = siblings.clone();
        children.insert(position, current);
        current = hasher.node_hash(&children)?;
    }

    Ok(current)
}

/// Check a proof against a tree shape
///
/// Returns `true` only if the proof has the right shape for `config` and replaying it from the
/// leaf reproduces the proof's root exactly. Malformed proofs are rejected rather than reported
/// as errors.
///
/// ```rust
/// # use accumulator::*;
/// # use accumulator::hash::{HashAdapter, Poseidon};
/// let config = TreeConfig::new(2, 2).unwrap();
/// let hasher = HashAdapter::for_config(Poseidon::init(), &config).unwrap();
/// let tree = FixedDepthTree::build(vec![FieldElement::from(5u64)], &config, &hasher).unwrap();
///
/// let proof = tree.proof_at(0).unwrap();
/// assert!(verify(&proof, &hasher, &config));
/// assert!(!verify(&proof.tampered(Tamper::Root).unwrap(), &hasher, &config));
/// ```
#[must_use = "`verify()` has no side effects - failures are indicated by returning `false`"]
pub fn verify(proof: &Proof, hasher: &HashAdapter, config: &TreeConfig) -> bool {
    if hasher.check_config(config).is_err() || proof.check_shape(config).is_err() {
        return false;
    }

    match compute_root(proof, hasher) {
        Ok(root) => root == proof.root,
        Err(_) => false,
    }
}
