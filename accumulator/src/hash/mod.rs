//! Items relating to hashing identifiers and tree nodes
//!
//! In particular, the [`HashAdapter`] type, which is the only way the trees in this crate touch a
//! hash function, and the [`HashPrimitive`] trait it wraps

use std::{fmt::Debug, sync::Arc};

use crate::{Error, FieldElement, Identifier, Result, TreeConfig};

mod poseidon;
pub use poseidon::Poseidon;

/// An opaque hash over field elements
///
/// Implementations must be deterministic: identical inputs always produce identical outputs
pub trait HashPrimitive: Debug + Send + Sync {
    /// The largest number of inputs [`HashPrimitive::hash`] accepts
    fn max_inputs(&self) -> usize;

    /// Hash a non-empty list of field elements into a single field element
    ///
    /// # Errors
    ///
    /// Returns [`Error::Hash`] if the primitive cannot hash this many inputs
    fn hash(&self, inputs: &[FieldElement]) -> Result<FieldElement>;
}

/// How a node combines its children, chosen once from the tree's arity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combine {
    /// Binary trees: `hash(left, right)`
    Pairwise,
    /// Trees with more than two children per node: one hash over all the children
    NAry(usize),
}

impl Combine {
    /// The combination mode for a given arity
    #[must_use]
    pub fn for_arity(arity: usize) -> Self {
        match arity {
            2 => Self::Pairwise,
            n => Self::NAry(n),
        }
    }

    /// The number of children combined per node
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::Pairwise => 2,
            Self::NAry(n) => n,
        }
    }
}

/// Leaf and node hashing for one tree shape
///
/// A [`HashAdapter`] is created once, explicitly, and passed into every tree that uses it. Cloning
/// is cheap (the primitive is reference counted)
///
/// ```rust
/// # use accumulator::{FieldElement, TreeConfig};
/// # use accumulator::hash::{HashAdapter, Poseidon};
/// let config = TreeConfig::new(3, 2).unwrap();
/// let hasher = HashAdapter::for_config(Poseidon::init(), &config).unwrap();
///
/// let a = hasher.node_hash(&[FieldElement::from(1u64), FieldElement::from(2u64)]).unwrap();
/// let b = hasher.node_hash(&[FieldElement::from(2u64), FieldElement::from(1u64)]).unwrap();
///
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct HashAdapter {
    primitive: Arc<dyn HashPrimitive>,
    combine: Combine,
}

impl HashAdapter {
    /// Wrap `primitive` for nodes with `arity` children
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `arity` is less than 2 or more than the primitive can
    /// hash at once
    pub fn new<P>(primitive: P, arity: usize) -> Result<Self>
    where
        P: HashPrimitive + 'static,
    {
        if arity < 2 || arity > primitive.max_inputs() {
            return Err(Error::InvalidConfig(format!(
                "arity {arity} is not supported by {primitive:?} (2..={})",
                primitive.max_inputs()
            )));
        }

        Ok(Self {
            primitive: Arc::new(primitive),
            combine: Combine::for_arity(arity),
        })
    }

    /// Wrap `primitive` for the arity of `config`
    ///
    /// # Errors
    ///
    /// See [`HashAdapter::new`]
    pub fn for_config<P>(primitive: P, config: &TreeConfig) -> Result<Self>
    where
        P: HashPrimitive + 'static,
    {
        Self::new(primitive, config.arity())
    }

    /// The combination mode of this adapter
    #[inline]
    #[must_use]
    pub fn combine(&self) -> Combine {
        self.combine
    }

    /// The number of children passed to [`HashAdapter::node_hash`]
    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.combine.arity()
    }

    /// Hash a member identifier into a leaf
    ///
    /// # Errors
    ///
    /// Returns [`Error::Hash`] if the primitive fails
    pub fn leaf_hash(&self, identifier: &Identifier) -> Result<FieldElement> {
        self.primitive.hash(&[identifier.to_element()])
    }

    /// Hash the children of a node into the node's value
    ///
    /// # Errors
    ///
    /// Returns [`Error::HashInput`] if `children` doesn't have exactly [`HashAdapter::arity`]
    /// elements
    pub fn node_hash(&self, children: &[FieldElement]) -> Result<FieldElement> {
        match (self.combine, children) {
            (Combine::Pairwise, [left, right]) => self.hash_pair(left, right),
            (Combine::NAry(n), children) if children.len() == n => self.primitive.hash(children),
            _ => Err(Error::HashInput {
                expected: self.arity(),
                actual: children.len(),
            }),
        }
    }

    fn hash_pair(&self, left: &FieldElement, right: &FieldElement) -> Result<FieldElement> {
        self.primitive.hash(&[left.clone(), right.clone()])
    }

    /// The padding value for an empty subtree at each level, from the leaves (`zero[0]`, the
    /// config's sentinel) up to the root of an empty tree (`zero[depth]`)
    ///
    /// Each level is the hash of `arity` copies of the level below it
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `config` has a different arity to this adapter
    pub fn zero_elements(&self, config: &TreeConfig) -> Result<Vec<FieldElement>> {
        self.check_config(config)?;

        let mut zeros = Vec::with_capacity(config.depth() + 1);
        let mut current = config.zero().clone();

        for _ in 0..config.depth() {
            let next = self.node_hash(&vec![current.clone(); self.arity()])?;
            zeros.push(current);
            current = next;
        }

        zeros.push(current);
        Ok(zeros)
    }

    pub(crate) fn check_config(&self, config: &TreeConfig) -> Result<()> {
        if config.arity() == self.arity() {
            Ok(())
        } else {
            Err(Error::InvalidConfig(format!(
                "hasher combines {} children but the tree has arity {}",
                self.arity(),
                config.arity()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{binary_hasher, element};

    use super::*;

    #[derive(Debug)]
    struct Sum;

    impl HashPrimitive for Sum {
        fn max_inputs(&self) -> usize {
            4
        }

        fn hash(&self, inputs: &[FieldElement]) -> Result<FieldElement> {
            Ok(inputs
                .iter()
                .fold(FieldElement::zero(), |acc, input| acc + input))
        }
    }

    #[test]
    fn arity_selects_combination() {
        assert_eq!(HashAdapter::new(Sum, 2).unwrap().combine(), Combine::Pairwise);
        assert_eq!(HashAdapter::new(Sum, 3).unwrap().combine(), Combine::NAry(3));
        assert_eq!(Combine::NAry(4).arity(), 4);
    }

    #[test]
    fn rejects_unsupported_arity() {
        assert!(matches!(HashAdapter::new(Sum, 1), Err(Error::InvalidConfig(_))));
        assert!(matches!(HashAdapter::new(Sum, 5), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn node_hash_checks_number_of_children() {
        let pairwise = HashAdapter::new(Sum, 2).unwrap();
        let ternary = HashAdapter::new(Sum, 3).unwrap();

        assert_eq!(
            pairwise.node_hash(&[element(1)]),
            Err(Error::HashInput {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            ternary.node_hash(&[element(1), element(2)]),
            Err(Error::HashInput {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            ternary.node_hash(&[element(1), element(2), element(3)]),
            Ok(element(6))
        );
    }

    #[test]
    fn zero_elements_hash_the_level_below() {
        let hasher = HashAdapter::new(Sum, 3).unwrap();
        let config = TreeConfig::new(3, 3).unwrap().with_zero(element(1));

        let zeros = hasher.zero_elements(&config).unwrap();

        assert_eq!(zeros, vec![element(1), element(3), element(9), element(27)]);
    }

    #[test]
    fn zero_elements_reject_mismatched_config() {
        let config = TreeConfig::new(3, 4).unwrap();
        assert!(matches!(
            binary_hasher().zero_elements(&config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn leaf_hash_ignores_identifier_case() {
        let hasher = binary_hasher();
        let lower = Identifier::parse("0xab8483f64d9c6d1ecf9b849ae677dd3315835cb2").unwrap();
        let upper = Identifier::parse("0xAB8483F64D9C6D1ECF9B849AE677DD3315835CB2").unwrap();

        assert_eq!(
            hasher.leaf_hash(&lower).unwrap(),
            hasher.leaf_hash(&upper).unwrap()
        );
    }
}
