use super::Proof;
use crate::{Error, Result};

/// A single field of a [`Proof`] to corrupt, for building proofs that must fail verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tamper {
    /// The leaf being proven
    Leaf,
    /// One sibling on the path
    PathElement {
        /// The level of the sibling, counting up from the leaves
        level: usize,
        /// The position of the sibling in `path_elements[level]`
        position: usize,
    },
    /// The claimed root
    Root,
}

impl Proof {
    /// A copy of this proof with the chosen field incremented by 1
    ///
    /// Everything else is left untouched, so the result is still well-formed but should no longer
    /// verify.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if the path element doesn't exist
    pub fn tampered(&self, tamper: Tamper) -> Result<Proof> {
        let mut proof = self.clone();

        match tamper {
            Tamper::Leaf => proof.leaf = proof.leaf + 1u64,
            Tamper::Root => proof.root = proof.root + 1u64,
            Tamper::PathElement { level, position } => {
                let depth = proof.path_elements.len();
                let siblings = proof
                    .path_elements
                    .get_mut(level)
                    .ok_or(Error::IndexOutOfRange {
                        index: level,
                        len: depth,
                    })?;

                let len = siblings.len();
                let sibling = siblings
                    .get_mut(position)
                    .ok_or(Error::IndexOutOfRange {
                        index: position,
                        len,
                    })?;

                *sibling = sibling.clone() + 1u64;
            }
        }

        Ok(proof)
    }
}
