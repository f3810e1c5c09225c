#![warn(clippy::pedantic)]
#![deny(missing_docs)]

//! Fixed-depth Merkle accumulator for membership proofs
//!
//! This library hashes member identifiers into leaves with a circom-compatible [Poseidon][poseidon]
//! hash, accumulates them into a fixed-depth, fixed-arity Merkle tree, and produces inclusion
//! proofs in the shape expected by a membership circuit.
//!
//! There are two trees, which always agree on roots and proofs:
//!  - [`FixedDepthTree`] is built once from a complete list of leaves
//!  - [`IncrementalTree`] grows one leaf at a time
//!
//! ```rust
//! # use accumulator::*;
//! # use accumulator::hash::{HashAdapter, Poseidon};
//! let config = TreeConfig::new(5, 2).unwrap();
//! let hasher = HashAdapter::for_config(Poseidon::init(), &config).unwrap();
//!
//! let leaves: Vec<FieldElement> = ["0x5B38Da6a701c568545dCfcB03FcB875f56beddC4", "0xAb8483F64d9C6d1EcF9b849Ae677dD3315835cb2"]
//!     .into_iter()
//!     .map(|id| hasher.leaf_hash(&Identifier::parse(id).unwrap()).unwrap())
//!     .collect();
//!
//! let tree = FixedDepthTree::build(leaves.clone(), &config, &hasher).unwrap();
//!
//! let mut incremental = IncrementalTree::new(&config, &hasher).unwrap();
//! incremental.extend(leaves.iter().cloned()).unwrap();
//! assert_eq!(tree.root(), incremental.root());
//!
//! let proof = tree.proof(&leaves[1]).unwrap();
//! assert!(verify(&proof, &hasher, &config));
//! ```
//!
//! [`FieldElement`] implements [`Arbitrary`], for use with [`proptest`], gated behind the
//! `proptest` feature flag.
//!
//! [poseidon]: https://eprint.iacr.org/2019/458.pdf
//! [`Arbitrary`]: proptest::prelude::Arbitrary

pub mod codec;
pub mod hash;

mod config;
mod element;
mod error;
mod identifier;
mod proof;
mod tree;

pub use config::TreeConfig;
pub use element::FieldElement;
pub use error::{Error, Result};
pub use identifier::Identifier;
pub use proof::{compute_root, verify, Proof, Tamper};
pub use tree::{FixedDepthTree, IncrementalTree};

#[cfg(test)]
mod testing;
