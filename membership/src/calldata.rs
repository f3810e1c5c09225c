//! Formatting for the on-chain verifier's `verifyProof(uint256[24], uint256[2])`
//!
//! The proving system exports its calldata as two JSON arrays of hex strings written back to
//! back, `["0x..", ...]["0x..", "0x.."]`. This module splits that into the proof and public
//! signals, checks their lengths, and writes them out as decimal strings alongside tampered
//! copies that the verifier must reject.

use accumulator::FieldElement;
use serde::Serialize;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CalldataError {
    #[error("expected two arrays written as [..][..]")]
    Shape,

    #[error("calldata is not valid JSON: {0}")]
    Json(String),

    #[error("{0:?} is not a 0x-prefixed hex or decimal integer")]
    Value(String),

    #[error("expected {expected} {name} values, got {actual}")]
    Length {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Calldata {
    pub proof: Vec<FieldElement>,
    pub public_signals: Vec<FieldElement>,
}

/// A valid calldata pair along with the negative fixtures derived from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    pub valid: Calldata,
    pub tampered_proof: Calldata,
    pub tampered_public_signals: Calldata,
}

impl Calldata {
    pub const PROOF_LEN: usize = 24;
    pub const PUBLIC_SIGNALS_LEN: usize = 2;

    pub fn parse(raw: &str) -> Result<Self, CalldataError> {
        let raw = raw.trim();
        let split = raw.find("][").ok_or(CalldataError::Shape)?;
        let (proof, signals) = raw.split_at(split + 1);

        let proof = parse_array(proof)?;
        let public_signals = parse_array(signals)?;

        check_len("proof", Self::PROOF_LEN, &proof)?;
        check_len("public signal", Self::PUBLIC_SIGNALS_LEN, &public_signals)?;

        Ok(Self {
            proof,
            public_signals,
        })
    }

    /// The same calldata with the first proof element incremented
    #[must_use]
    pub fn with_tampered_proof(&self) -> Self {
        let mut tampered = self.clone();
        if let Some(first) = tampered.proof.first_mut() {
            *first = first.clone() + 1u64;
        }
        tampered
    }

    /// The same calldata with every public signal incremented
    #[must_use]
    pub fn with_tampered_public_signals(&self) -> Self {
        let mut tampered = self.clone();
        for signal in &mut tampered.public_signals {
            *signal = signal.clone() + 1u64;
        }
        tampered
    }

    pub fn fixtures(self) -> Fixtures {
        Fixtures {
            tampered_proof: self.with_tampered_proof(),
            tampered_public_signals: self.with_tampered_public_signals(),
            valid: self,
        }
    }
}

fn parse_array(json: &str) -> Result<Vec<FieldElement>, CalldataError> {
    let values: Vec<String> =
        serde_json::from_str(json).map_err(|e| CalldataError::Json(e.to_string()))?;

    values.iter().map(|value| parse_uint(value)).collect()
}

fn parse_uint(value: &str) -> Result<FieldElement, CalldataError> {
    let Some(digits) = value.strip_prefix("0x") else {
        return value
            .parse()
            .map_err(|_| CalldataError::Value(value.to_string()));
    };

    let padded = if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits.to_string()
    };

    hex::decode(padded)
        .map(|bytes| FieldElement::from_be_bytes(&bytes))
        .map_err(|_| CalldataError::Value(value.to_string()))
}

fn check_len(
    name: &'static str,
    expected: usize,
    values: &[FieldElement],
) -> Result<(), CalldataError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(CalldataError::Length {
            name,
            expected,
            actual: values.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn hex_array(values: impl Iterator<Item = u64>) -> String {
        let values: Vec<String> = values.map(|v| format!("\"0x{v:064x}\"")).collect();
        format!("[{}]", values.join(","))
    }

    fn raw(proof: usize, signals: usize) -> String {
        format!(
            "{}{}\n",
            hex_array(1..=proof as u64),
            hex_array(100..100 + signals as u64)
        )
    }

    #[test]
    fn parses_hex_into_decimal() {
        let calldata = Calldata::parse(&raw(24, 2)).unwrap();

        assert_eq!(calldata.proof.len(), 24);
        assert_eq!(calldata.proof[0], FieldElement::from_u64(1));
        assert_eq!(calldata.proof[23], FieldElement::from_u64(24));
        assert_eq!(
            calldata.public_signals,
            vec![FieldElement::from_u64(100), FieldElement::from_u64(101)]
        );
    }

    #[test]
    fn serializes_as_decimal_strings() {
        let calldata = Calldata::parse(&raw(24, 2)).unwrap();
        let value = serde_json::to_value(&calldata).unwrap();

        assert_eq!(value["proof"][0], "1");
        assert_eq!(value["publicSignals"], serde_json::json!(["100", "101"]));
    }

    #[test]
    fn tampered_fixtures() {
        let fixtures = Calldata::parse(&raw(24, 2)).unwrap().fixtures();

        assert_eq!(fixtures.tampered_proof.proof[0], FieldElement::from_u64(2));
        assert_eq!(fixtures.tampered_proof.proof[1..], fixtures.valid.proof[1..]);
        assert_eq!(
            fixtures.tampered_proof.public_signals,
            fixtures.valid.public_signals
        );

        assert_eq!(
            fixtures.tampered_public_signals.public_signals,
            vec![FieldElement::from_u64(101), FieldElement::from_u64(102)]
        );
        assert_eq!(fixtures.tampered_public_signals.proof, fixtures.valid.proof);
    }

    #[test]
    fn accepts_decimal_and_short_hex() {
        assert_eq!(parse_uint("0xa").unwrap(), FieldElement::from_u64(10));
        assert_eq!(parse_uint("0x0100").unwrap(), FieldElement::from_u64(256));
        assert_eq!(parse_uint("77").unwrap(), FieldElement::from_u64(77));
        assert_eq!(parse_uint("0xzz"), Err(CalldataError::Value("0xzz".into())));
    }

    #[test]
    fn rejects_wrong_lengths() {
        assert_eq!(
            Calldata::parse(&raw(23, 2)),
            Err(CalldataError::Length {
                name: "proof",
                expected: 24,
                actual: 23
            })
        );
        assert_eq!(
            Calldata::parse(&raw(24, 3)),
            Err(CalldataError::Length {
                name: "public signal",
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn rejects_a_single_array() {
        assert_eq!(
            Calldata::parse(&hex_array(1..=24)),
            Err(CalldataError::Shape)
        );
        assert!(matches!(
            Calldata::parse("[1][2"),
            Err(CalldataError::Json(_))
        ));
    }
}
