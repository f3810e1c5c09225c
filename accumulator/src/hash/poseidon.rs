use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use light_poseidon::PoseidonHasher;
use num_bigint::BigUint;

use super::HashPrimitive;
use crate::{Error, FieldElement, Result};

/// The circom-compatible Poseidon hash over the BN254 scalar field
///
/// This matches `circomlibjs`' `buildPoseidon` and the `Poseidon(n)` template in circomlib, so
/// roots computed here can be checked inside a circom circuit. Inputs must already be field
/// elements: values at or above the modulus are rejected rather than reduced.
#[derive(Debug, Default, Clone, Copy)]
pub struct Poseidon;

impl Poseidon {
    /// The largest number of inputs the circom parameters are defined for
    pub const MAX_INPUTS: usize = 12;

    /// Set up the primitive
    ///
    /// This is the one-time initialization step: the result should be wrapped in a
    /// [`HashAdapter`] and handed to the trees that use it
    ///
    /// [`HashAdapter`]: super::HashAdapter
    #[must_use]
    pub fn init() -> Self {
        Self
    }
}

impl HashPrimitive for Poseidon {
    fn max_inputs(&self) -> usize {
        Self::MAX_INPUTS
    }

    fn hash(&self, inputs: &[FieldElement]) -> Result<FieldElement> {
        if let Some(input) = inputs.iter().find(|input| !input.is_canonical()) {
            return Err(Error::Hash(format!(
                "{input} is not below the BN254 scalar field modulus"
            )));
        }

        let mut hasher = light_poseidon::Poseidon::<Fr>::new_circom(inputs.len())
            .map_err(|e| Error::Hash(e.to_string()))?;

        let inputs: Vec<Fr> = inputs.iter().map(to_fr).collect();
        let hash = hasher
            .hash(&inputs)
            .map_err(|e| Error::Hash(e.to_string()))?;

        Ok(from_fr(hash))
    }
}

fn to_fr(element: &FieldElement) -> Fr {
    Fr::from_be_bytes_mod_order(&element.to_be_bytes())
}

fn from_fr(fr: Fr) -> FieldElement {
    FieldElement::from(BigUint::from_bytes_be(&fr.into_bigint().to_bytes_be()))
}
