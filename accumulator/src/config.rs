use crate::{Error, FieldElement, Result};

/// The shape of a tree: how deep it is, how many children each node has, and which value pads
/// empty leaf slots
///
/// ```rust
/// # use accumulator::{TreeConfig, FieldElement};
/// let config = TreeConfig::new(5, 2).unwrap();
///
/// assert_eq!(config.capacity(), 32);
/// assert_eq!(*config.zero(), FieldElement::zero());
/// ```
///
/// A [`TreeConfig`] is validated on construction, so every tree built from one has a capacity
/// that fits in a `usize`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeConfig {
    depth: usize,
    arity: usize,
    zero: FieldElement,
    capacity: usize,
}

impl TreeConfig {
    /// Create a config with the default zero sentinel (`0`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `depth` is 0, `arity` is less than 2, or `arity ^ depth`
    /// overflows a `usize`
    pub fn new(depth: usize, arity: usize) -> Result<Self> {
        if depth == 0 {
            return Err(Error::InvalidConfig(
                "the smallest possible tree has depth 1".to_string(),
            ));
        }

        if arity < 2 {
            return Err(Error::InvalidConfig(format!(
                "arity must be at least 2, got {arity}"
            )));
        }

        let capacity = u32::try_from(depth)
            .ok()
            .and_then(|depth| arity.checked_pow(depth))
            .ok_or_else(|| {
                Error::InvalidConfig(format!("capacity {arity}^{depth} does not fit in memory"))
            })?;

        Ok(Self {
            depth,
            arity,
            zero: FieldElement::zero(),
            capacity,
        })
    }

    /// Replace the value used to pad empty leaf slots
    #[must_use]
    pub fn with_zero(mut self, zero: FieldElement) -> Self {
        self.zero = zero;
        self
    }

    /// The number of levels between the leaves and the root
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The number of children of each internal node
    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The sentinel representing an absent leaf
    #[inline]
    #[must_use]
    pub fn zero(&self) -> &FieldElement {
        &self.zero
    }

    /// The maximum number of leaves, `arity ^ depth`
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_arity_to_the_depth() {
        assert_eq!(TreeConfig::new(1, 2).unwrap().capacity(), 2);
        assert_eq!(TreeConfig::new(5, 2).unwrap().capacity(), 32);
        assert_eq!(TreeConfig::new(3, 4).unwrap().capacity(), 64);
        assert_eq!(TreeConfig::new(2, 3).unwrap().capacity(), 9);
    }

    #[test]
    fn rejects_degenerate_shapes() {
        assert!(matches!(TreeConfig::new(0, 2), Err(Error::InvalidConfig(_))));
        assert!(matches!(TreeConfig::new(4, 1), Err(Error::InvalidConfig(_))));
        assert!(matches!(TreeConfig::new(4, 0), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_overflowing_capacity() {
        assert!(matches!(
            TreeConfig::new(usize::BITS as usize, 2),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(TreeConfig::new(200, 3), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn zero_sentinel_is_configurable() {
        let zero = FieldElement::from_u64(7);
        let config = TreeConfig::new(3, 2).unwrap().with_zero(zero.clone());

        assert_eq!(*config.zero(), zero);
        assert_eq!(config.depth(), 3);
        assert_eq!(config.arity(), 2);
    }
}
