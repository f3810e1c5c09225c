use crate::{
    hash::{HashAdapter, Poseidon},
    FieldElement, Identifier, TreeConfig,
};

pub fn element(i: u64) -> FieldElement {
    FieldElement::from_u64(i)
}

pub fn config(depth: usize, arity: usize) -> TreeConfig {
    TreeConfig::new(depth, arity).unwrap()
}

pub fn hasher_for(config: &TreeConfig) -> HashAdapter {
    HashAdapter::for_config(Poseidon::init(), config).unwrap()
}

pub fn binary_hasher() -> HashAdapter {
    HashAdapter::new(Poseidon::init(), 2).unwrap()
}

/// `n` distinct small leaves, starting from 1 so none collide with the default zero sentinel
pub fn leaves(n: u64) -> Vec<FieldElement> {
    (1..=n).map(element).collect()
}

pub const ALICE: &str = "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4";
pub const BOB: &str = "0xAb8483F64d9C6d1EcF9b849Ae677dD3315835cb2";

pub fn hashed(hasher: &HashAdapter, identifier: &str) -> FieldElement {
    hasher
        .leaf_hash(&Identifier::parse(identifier).unwrap())
        .unwrap()
}
