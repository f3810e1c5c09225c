use std::{
    fs,
    path::{Path, PathBuf},
};

use accumulator::{
    codec,
    hash::{HashAdapter, Poseidon},
    verify, FieldElement, FixedDepthTree, Identifier, IncrementalTree, Proof, TreeConfig,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    calldata::Calldata,
    config::Config,
    errors::{AppError, Result},
    util::Paths,
};

/// The member list, as found in `data/addresses.json`
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Members {
    pub members: Vec<String>,
}

/// Everything a command needs: where the artifacts live and the shape of the tree
#[derive(Debug, Clone)]
pub(crate) struct Pipeline {
    paths: Paths,
    tree: TreeConfig,
    hasher: HashAdapter,
    index: usize,
    proof_file: PathBuf,
}

impl Pipeline {
    pub fn new(paths: Paths, tree: TreeConfig, index: usize, proof_file: PathBuf) -> Result<Self> {
        let hasher = HashAdapter::for_config(Poseidon::init(), &tree)?;

        Ok(Self {
            paths,
            tree,
            hasher,
            index,
            proof_file,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let paths = Paths::from_root_dir(&config.root_dir)
            .ok_or_else(|| AppError::RootDir(config.root_dir.clone()))?;

        let zero: FieldElement = config.zero.parse()?;
        let tree = TreeConfig::new(config.depth, config.arity)?.with_zero(zero);
        let proof_file = paths.join(&config.proof_file);

        Self::new(paths, tree, config.index, proof_file)
    }

    /// Hash every member identifier into a leaf, keeping the order of the member list
    #[tracing::instrument(skip(self))]
    pub fn hash_leaves(&self) -> Result<Vec<FieldElement>> {
        let members: Members = read_json(&self.paths.addresses())?;
        let identifiers = Identifier::parse_all(&members.members)?;

        let leaves = identifiers
            .iter()
            .map(|identifier| self.hasher.leaf_hash(identifier))
            .collect::<accumulator::Result<Vec<_>>>()?;

        let out = self.paths.hashed_leaves();
        write_json(&out, &leaves)?;
        info!(count = leaves.len(), path = %out.display(), "hashed leaves");

        Ok(leaves)
    }

    /// Build the fixed-depth tree and write the circuit input for the configured leaf
    #[tracing::instrument(skip(self), fields(index = self.index))]
    pub fn prove(&self) -> Result<Proof> {
        let leaves = self.read_leaves()?;
        let leaf = self.selected_leaf(&leaves)?;

        let tree = FixedDepthTree::build(leaves, &self.tree, &self.hasher)?;
        let proof = tree.proof(&leaf)?;

        if proof.leaf_index() != self.index {
            warn!(
                proven = proof.leaf_index(),
                "leaf value appears more than once, proving its first position"
            );
        }

        self.write_proof(&self.paths.fixed_input(), &proof)?;
        Ok(proof)
    }

    /// Build the incremental tree one leaf at a time and write the circuit input for the
    /// configured leaf
    #[tracing::instrument(skip(self), fields(index = self.index))]
    pub fn prove_incremental(&self) -> Result<Proof> {
        let leaves = self.read_leaves()?;
        self.selected_leaf(&leaves)?;

        let mut tree = IncrementalTree::new(&self.tree, &self.hasher)?;
        tree.extend(leaves)?;
        let proof = tree.proof(self.index)?;

        self.write_proof(&self.paths.incremental_input(), &proof)?;
        Ok(proof)
    }

    /// Check the configured circuit input file against the tree shape
    #[tracing::instrument(skip(self), fields(path = %self.proof_file.display()))]
    pub fn verify(&self) -> Result<Proof> {
        let json = read_to_string(&self.proof_file)?;
        let proof = codec::decode(&json, &self.tree)?;

        if !verify(&proof, &self.hasher, &self.tree) {
            return Err(AppError::ProofRejected {
                path: self.proof_file.clone(),
            });
        }

        info!(root = %proof.root(), "proof accepted");
        Ok(proof)
    }

    /// Turn the exported verifier calldata into decimal arrays, along with tampered copies
    #[tracing::instrument(skip(self))]
    pub fn calldata(&self) -> Result<Calldata> {
        let raw = read_to_string(&self.paths.raw_calldata())?;
        let calldata = Calldata::parse(&raw)?;

        let out = self.paths.calldata();
        write_json(&out, &calldata.clone().fixtures())?;
        info!(path = %out.display(), "wrote calldata fixtures");

        Ok(calldata)
    }

    fn read_leaves(&self) -> Result<Vec<FieldElement>> {
        let leaves: Vec<FieldElement> = read_json(&self.paths.hashed_leaves())?;
        debug!(count = leaves.len(), "read hashed leaves");
        Ok(leaves)
    }

    fn selected_leaf(&self, leaves: &[FieldElement]) -> Result<FieldElement> {
        leaves.get(self.index).cloned().ok_or(AppError::NoSuchLeaf {
            index: self.index,
            len: leaves.len(),
        })
    }

    fn write_proof(&self, path: &Path, proof: &Proof) -> Result<()> {
        let json = codec::encode(proof)?;
        write_file(path, &json)?;
        info!(root = %proof.root(), leaf = %proof.leaf(), path = %path.display(), "wrote circuit input");
        Ok(())
    }
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_file(path, &json)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    };

    write().map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })
}
