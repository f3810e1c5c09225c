use crate::FieldElement;

/// Convenience alias for results returned by this crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error encountered while hashing, building a tree, or handling a proof
///
/// Every error aborts the operation that produced it: no partially built tree or partially
/// decoded proof is ever returned alongside one of these
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A member identifier was not a well-formed hex string
    #[error("malformed identifier {value:?}{}: {reason}", position(.index))]
    AddressParse {
        /// The position of the identifier in its source list, if known
        index: Option<usize>,
        /// The offending input
        value: String,
        /// Why the input was rejected
        reason: &'static str,
    },

    /// `node_hash` was called with the wrong number of children
    #[error("expected {expected} children to hash, got {actual}")]
    HashInput {
        /// The arity of the adapter
        expected: usize,
        /// The number of children that were passed
        actual: usize,
    },

    /// The hash primitive rejected its inputs
    #[error("hash primitive failed: {0}")]
    Hash(String),

    /// More leaves than the tree can hold
    #[error("tree capacity of {capacity} leaves exceeded (needed room for {requested})")]
    CapacityExceeded {
        /// `arity ^ depth`
        capacity: usize,
        /// The number of leaves the operation needed
        requested: usize,
    },

    /// No leaf in the tree has the requested value
    #[error("leaf {leaf} is not in the tree")]
    LeafNotFound {
        /// The value that was looked up
        leaf: FieldElement,
    },

    /// The requested leaf index has not been filled yet
    #[error("leaf index {index} is out of range (tree has {len} leaves)")]
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// The number of leaves in the tree
        len: usize,
    },

    /// A serialized proof was malformed or had the wrong shape
    #[error("malformed proof: {0}")]
    ProofFormat(String),

    /// A tree configuration (or an adapter/config pairing) was not usable
    #[error("invalid tree configuration: {0}")]
    InvalidConfig(String),
}

fn position(index: &Option<usize>) -> String {
    index.map(|i| format!(" at position {i}")).unwrap_or_default()
}
