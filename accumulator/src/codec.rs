//! The JSON document a [`Proof`] is handed to the membership circuit as
//!
//! Every number is written as a decimal string, except the path indices:
//!
//! ```json
//! {
//!   "root": "1234...",
//!   "leaf": "5678...",
//!   "pathElements": ["...", "..."],
//!   "pathIndices": [0, 1]
//! }
//! ```
//!
//! For binary trees, `pathElements` holds one sibling per level. For wider trees, each level is an
//! array of `arity - 1` siblings. [`decode`] accepts either form as long as it fits the tree.

use serde::{Deserialize, Serialize};

use crate::{proof, Error, FieldElement, Proof, Result, TreeConfig};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct Document {
    root: String,
    leaf: String,
    path_elements: Vec<PathElement>,
    path_indices: Vec<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum PathElement {
    Single(String),
    Group(Vec<String>),
}

impl PathElement {
    fn into_siblings(self) -> Vec<String> {
        match self {
            Self::Single(element) => vec![element],
            Self::Group(group) => group,
        }
    }
}

/// Write a proof as a pretty-printed circuit input document
///
/// # Errors
///
/// Returns [`Error::ProofFormat`] if serialization fails
pub fn encode(proof: &Proof) -> Result<String> {
    let path_elements = proof
        .path_elements()
        .iter()
        .map(|siblings| match siblings.as_slice() {
            [single] => PathElement::Single(single.to_string()),
            group => PathElement::Group(group.iter().map(ToString::to_string).collect()),
        })
        .collect();

    let document = Document {
        root: proof.root().to_string(),
        leaf: proof.leaf().to_string(),
        path_elements,
        path_indices: proof.path_indices().to_vec(),
    };

    serde_json::to_string_pretty(&document).map_err(|e| Error::ProofFormat(e.to_string()))
}

/// Read a circuit input document back into a proof for a tree with this config
///
/// The leaf index isn't part of the document, so it is rebuilt from the path indices
///
/// # Errors
///
/// Returns [`Error::ProofFormat`] if the JSON is malformed, a field is missing or unknown, a value
/// isn't a decimal string below the field modulus, or the path doesn't have the depth, group
/// sizes or index range of `config`
pub fn decode(json: &str, config: &TreeConfig) -> Result<Proof> {
    let document: Document =
        serde_json::from_str(json).map_err(|e| Error::ProofFormat(e.to_string()))?;

    let leaf = parse_element(&document.leaf)?;
    let root = parse_element(&document.root)?;

    let path_elements = document
        .path_elements
        .into_iter()
        .map(|level| {
            level
                .into_siblings()
                .iter()
                .map(|sibling| parse_element(sibling))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    let proof = Proof::new(
        leaf,
        proof::leaf_index(&document.path_indices, config.arity()),
        path_elements,
        document.path_indices,
        root,
    );

    proof.check_shape(config)?;

    Ok(proof)
}

fn parse_element(text: &str) -> Result<FieldElement> {
    let element: FieldElement = text.parse()?;

    if element.is_canonical() {
        Ok(element)
    } else {
        Err(Error::ProofFormat(format!(
            "{element} is not below the field modulus"
        )))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        element::modulus,
        testing::{config, hasher_for, leaves},
        verify, FixedDepthTree,
    };

    fn proof(depth: usize, arity: usize, index: usize) -> Proof {
        let config = config(depth, arity);
        let hasher = hasher_for(&config);
        let tree = FixedDepthTree::build(leaves(6), &config, &hasher).unwrap();

        tree.proof_at(index).unwrap()
    }

    #[test]
    fn binary_document_layout() {
        let proof = proof(2, 2, 3);
        let value: serde_json::Value = serde_json::from_str(&encode(&proof).unwrap()).unwrap();

        let expected = serde_json::json!({
            "root": proof.root().to_string(),
            "leaf": "4",
            "pathElements": [
                proof.path_elements()[0][0].to_string(),
                proof.path_elements()[1][0].to_string(),
            ],
            "pathIndices": [1, 1],
        });

        assert_eq!(value, expected);
    }

    #[test]
    fn keys_are_in_document_order() {
        let json = encode(&proof(2, 2, 0)).unwrap();

        let positions: Vec<_> = ["\"root\"", "\"leaf\"", "\"pathElements\"", "\"pathIndices\""]
            .iter()
            .map(|key| json.find(key).unwrap())
            .collect();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn n_ary_levels_are_grouped() {
        let proof = proof(2, 3, 4);
        let value: serde_json::Value = serde_json::from_str(&encode(&proof).unwrap()).unwrap();

        let levels = value["pathElements"].as_array().unwrap();
        assert_eq!(levels.len(), 2);
        assert!(levels.iter().all(|level| level.as_array().unwrap().len() == 2));
        assert_eq!(value["pathIndices"], serde_json::json!([1, 1]));
    }

    #[test]
    fn round_trip() {
        for (depth, arity, index) in [(3, 2, 5), (2, 3, 4), (2, 4, 0), (5, 2, 0)] {
            let proof = proof(depth, arity, index);
            let decoded = decode(&encode(&proof).unwrap(), &config(depth, arity)).unwrap();

            assert_eq!(decoded, proof);
        }
    }

    #[test]
    fn decoded_proofs_verify() {
        let config = config(3, 2);
        let proof = proof(3, 2, 2);

        let decoded = decode(&encode(&proof).unwrap(), &config).unwrap();

        assert!(verify(&decoded, &hasher_for(&config), &config));
    }

    #[test]
    fn accepts_grouped_binary_path() {
        let json = r#"{
            "root": "10",
            "leaf": "1",
            "pathElements": [["2"], ["3"]],
            "pathIndices": [1, 0]
        }"#;

        let proof = decode(json, &config(2, 2)).unwrap();

        assert_eq!(
            proof.path_elements(),
            &[vec![FieldElement::from(2u64)], vec![FieldElement::from(3u64)]]
        );
        assert_eq!(proof.leaf_index(), 1);
    }

    fn decode_err(json: &str, depth: usize, arity: usize) -> Error {
        decode(json, &config(depth, arity)).unwrap_err()
    }

    #[test]
    fn rejects_malformed_documents() {
        let cases = [
            // not JSON
            "{",
            // missing root
            r#"{"leaf": "1", "pathElements": ["2", "3"], "pathIndices": [0, 0]}"#,
            // hex instead of decimal
            r#"{"root": "0x10", "leaf": "1", "pathElements": ["2", "3"], "pathIndices": [0, 0]}"#,
            // negative index
            r#"{"root": "10", "leaf": "1", "pathElements": ["2", "3"], "pathIndices": [0, -1]}"#,
            // too shallow
            r#"{"root": "10", "leaf": "1", "pathElements": ["2"], "pathIndices": [0]}"#,
            // indices and elements disagree
            r#"{"root": "10", "leaf": "1", "pathElements": ["2", "3"], "pathIndices": [0]}"#,
            // index out of range for a binary tree
            r#"{"root": "10", "leaf": "1", "pathElements": ["2", "3"], "pathIndices": [0, 2]}"#,
            // group too large
            r#"{"root": "10", "leaf": "1", "pathElements": [["2", "4"], "3"], "pathIndices": [0, 0]}"#,
            // bare numbers instead of decimal strings
            r#"{"root": 10, "leaf": "1", "pathElements": ["2", "3"], "pathIndices": [0, 0]}"#,
            r#"{"root": "10", "leaf": "1", "pathElements": [2, "3"], "pathIndices": [0, 0]}"#,
            r#"{"root": "10", "leaf": "1", "pathElements": [["2"], [3]], "pathIndices": [0, 0]}"#,
            // unknown key
            r#"{"root": "10", "leaf": "1", "pathElements": ["2", "3"], "pathIndices": [0, 0], "junk": true}"#,
        ];

        for json in cases {
            assert!(
                matches!(decode_err(json, 2, 2), Error::ProofFormat(_)),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_flat_path_for_wide_trees() {
        let json = r#"{"root": "10", "leaf": "1", "pathElements": ["2", "3"], "pathIndices": [0, 0]}"#;

        assert!(matches!(decode_err(json, 2, 3), Error::ProofFormat(_)));
    }

    #[test]
    fn rejects_values_outside_the_field() {
        let proof = proof(3, 2, 4);
        let encoded: serde_json::Value = serde_json::from_str(&encode(&proof).unwrap()).unwrap();
        let p = FieldElement::from(modulus());
        let shifted = |value: &FieldElement| (value.clone() + &p).to_string();

        let mut leaf = encoded.clone();
        leaf["leaf"] = shifted(proof.leaf()).into();

        let mut sibling = encoded.clone();
        sibling["pathElements"][1] = shifted(&proof.path_elements()[1][0]).into();

        let mut root = encoded;
        root["root"] = shifted(proof.root()).into();

        for document in [leaf, sibling, root] {
            let json = document.to_string();
            assert!(
                matches!(decode_err(&json, 3, 2), Error::ProofFormat(_)),
                "{json} should be rejected"
            );
        }
    }
}
