use core::fmt::Display;
use std::str::FromStr;

use crate::{Error, FieldElement, Result};

/// A member identifier: a 20-byte value written as hex (an Ethereum-style address)
///
/// Identifiers are normalized to lowercase with a `0x` prefix on parse, so differently-cased
/// spellings of the same address produce the same leaf:
///
/// ```rust
/// # use accumulator::Identifier;
/// let a = Identifier::parse("0x5B38Da6a701c568545dCfcB03FcB875f56beddC4").unwrap();
/// let b = Identifier::parse("5b38da6a701c568545dcfcb03fcb875f56beddc4").unwrap();
///
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "0x5b38da6a701c568545dcfcb03fcb875f56beddc4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    bytes: [u8; Identifier::BYTES],
    normalized: String,
}

impl Identifier {
    /// The number of bytes in an identifier
    pub const BYTES: usize = 20;

    /// Parse a hex identifier, with or without a `0x`/`0X` prefix, in any case
    ///
    /// # Errors
    ///
    /// Returns [`Error::AddressParse`] if the input is not exactly [`Identifier::BYTES`] bytes of
    /// hex
    pub fn parse(value: &str) -> Result<Self> {
        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);

        let error = |reason| Error::AddressParse {
            index: None,
            value: value.to_string(),
            reason,
        };

        if digits.len() != Self::BYTES * 2 {
            return Err(error("expected 40 hex digits"));
        }

        let mut bytes = [0; Self::BYTES];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| error("contains a non-hex character"))?;

        Ok(Self {
            bytes,
            normalized: format!("0x{}", hex::encode(bytes)),
        })
    }

    /// Parse a list of identifiers, keeping their order
    ///
    /// # Errors
    ///
    /// Fails on the first malformed entry, reporting its position in the list
    pub fn parse_all<I, S>(values: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                Self::parse(value.as_ref()).map_err(|e| match e {
                    Error::AddressParse { value, reason, .. } => Error::AddressParse {
                        index: Some(i),
                        value,
                        reason,
                    },
                    other => other,
                })
            })
            .collect()
    }

    /// The normalized form: `0x` followed by 40 lowercase hex digits
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// The raw bytes of the identifier
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        self.bytes
    }

    /// The identifier as an unsigned integer, which is what gets hashed into a leaf
    #[must_use]
    pub fn to_element(&self) -> FieldElement {
        FieldElement::from_be_bytes(&self.to_bytes())
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4";

    #[test]
    fn normalizes_case_and_prefix() {
        let upper = Identifier::parse(&ADDRESS.to_uppercase().replacen("0X", "0x", 1)).unwrap();
        let bare = Identifier::parse(&ADDRESS[2..]).unwrap();
        let mixed = Identifier::parse(ADDRESS).unwrap();

        assert_eq!(upper, mixed);
        assert_eq!(bare, mixed);
        assert_eq!(mixed.to_string(), ADDRESS.to_lowercase());
    }

    #[test]
    fn element_is_the_address_as_an_integer() {
        let id = Identifier::parse("0x0000000000000000000000000000000000000100").unwrap();
        assert_eq!(id.to_element(), FieldElement::from_u64(256));
    }

    #[test]
    fn rejects_wrong_length() {
        let err = Identifier::parse("0x1234").unwrap_err();
        assert!(matches!(err, Error::AddressParse { index: None, .. }));
    }

    #[test]
    fn rejects_non_hex() {
        let err = Identifier::parse("0x5B38Da6a701c568545dCfcB03FcB875f56beddZ4").unwrap_err();
        assert!(matches!(
            err,
            Error::AddressParse {
                reason: "contains a non-hex character",
                ..
            }
        ));
    }

    #[test]
    fn parse_all_reports_position() {
        let err = Identifier::parse_all([ADDRESS, ADDRESS, "nope"]).unwrap_err();

        assert_eq!(
            err,
            Error::AddressParse {
                index: Some(2),
                value: "nope".to_string(),
                reason: "expected 40 hex digits",
            }
        );
    }

    #[test]
    fn parse_all_keeps_order() {
        let other = "0xAb8483F64d9C6d1EcF9b849Ae677dD3315835cb2";
        let ids = Identifier::parse_all([other, ADDRESS]).unwrap();

        assert_eq!(ids[0].as_str(), other.to_lowercase());
        assert_eq!(ids[1].as_str(), ADDRESS.to_lowercase());
    }
}
