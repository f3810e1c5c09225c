use core::fmt::Display;
use std::str::FromStr;

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use num_bigint::BigUint;

use crate::Error;

mod serde;

/// An arbitrary-precision non-negative integer, used as a leaf, node, or root value
///
/// Values are never reduced: anything at or above the BN254 scalar field modulus is rejected by
/// the hash primitive instead, so two values that compare unequal as integers never hash the
/// same. The canonical text form is the decimal string:
///
/// ```rust
/// # use accumulator::FieldElement;
/// let element: FieldElement = "12345678901234567890123456789".parse().unwrap();
/// assert_eq!(element.to_string(), "12345678901234567890123456789");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldElement(pub(crate) BigUint);

impl Display for FieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FieldElement {
    /// The additive identity, and the default zero sentinel of a tree
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self(BigUint::default())
    }

    /// Create a new [`FieldElement`] from a u64
    #[inline]
    #[must_use]
    pub fn from_u64(i: u64) -> Self {
        Self(BigUint::from(i))
    }

    /// Interpret big-endian bytes as an unsigned integer
    #[inline]
    #[must_use]
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Self(BigUint::from_bytes_be(bytes))
    }

    /// The minimal big-endian byte representation (`[0]` for zero)
    #[inline]
    #[must_use]
    pub fn to_be_bytes(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    /// Borrow the underlying [`BigUint`]
    #[inline]
    #[must_use]
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Whether this value is below the BN254 scalar field modulus
    ///
    /// Only these values can be hashed, or read from a circuit input document
    #[inline]
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.0 < modulus()
    }
}

/// The order of the BN254 scalar field
pub(crate) fn modulus() -> BigUint {
    BigUint::from_bytes_le(&Fr::MODULUS.to_bytes_le())
}

impl FromStr for FieldElement {
    type Err = Error;

    /// Parse a decimal string
    ///
    /// Only ASCII digits are accepted: no sign, whitespace, separators or radix prefix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::ProofFormat(format!(
                "{s:?} is not a decimal field element"
            )));
        }

        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| Error::ProofFormat(format!("{s:?} is not a decimal field element")))
    }
}

impl From<BigUint> for FieldElement {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<FieldElement> for BigUint {
    fn from(value: FieldElement) -> Self {
        value.0
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl core::ops::Add<u64> for FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: u64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl core::ops::Add<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &FieldElement) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl PartialEq<u64> for FieldElement {
    fn eq(&self, other: &u64) -> bool {
        self.0 == BigUint::from(*other)
    }
}

#[cfg(any(test, feature = "proptest"))]
mod proptest {
    use super::{modulus, BigUint, FieldElement};
    use ::proptest::{arbitrary::StrategyFor, prelude::*, strategy::Map};

    impl Arbitrary for FieldElement {
        type Strategy = Map<StrategyFor<[u32; 8]>, fn([u32; 8]) -> Self>;
        type Parameters = ();

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            any::<[u32; 8]>().prop_map(|digits| Self(BigUint::from_slice(&digits) % modulus()))
        }
    }
}

#[cfg(test)]
mod test {
    use super::{modulus, FieldElement};

    #[test]
    fn syntax_test() {
        let element = FieldElement::from_u64(123);

        assert_eq!(element.clone() + 1u64, FieldElement::from_u64(124));
        assert_eq!(element.clone() + &FieldElement::from(2u64), FieldElement::from_u64(125));
        assert_eq!(element, 123u64);

        assert_eq!(FieldElement::from(1u64).to_string(), "1");
        assert_eq!(FieldElement::zero().to_string(), "0");
        assert_eq!(FieldElement::default(), FieldElement::zero());
    }

    #[test]
    fn parses_numbers_wider_than_a_word() {
        let text = "21663839004416932945382355908790599225266501822907911457504978515578255421292";
        let element: FieldElement = text.parse().unwrap();

        assert_eq!(element.to_string(), text);
        assert_eq!(FieldElement::from_be_bytes(&element.to_be_bytes()), element);
    }

    #[test]
    fn rejects_non_decimal_text() {
        for bad in ["", "-1", "+1", "0x10", "1_000", " 1", "1.5", "abc"] {
            assert!(bad.parse::<FieldElement>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn leading_zeroes_are_not_significant() {
        let element: FieldElement = "007".parse().unwrap();
        assert_eq!(element, 7u64);
        assert_eq!(element.to_string(), "7");
    }

    #[test]
    fn canonical_values_are_below_the_modulus() {
        let p = FieldElement::from(modulus());

        assert_eq!(
            p.to_string(),
            "21888242871839275222246405745257275088548364400416034343698204186575808495617"
        );
        assert!(FieldElement::zero().is_canonical());
        assert!(FieldElement::from(modulus() - 1u64).is_canonical());
        assert!(!p.is_canonical());
        assert!(!(p + 1u64).is_canonical());
    }
}
