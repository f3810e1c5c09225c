use crate::{hash::HashAdapter, Error, FieldElement, Proof, Result, TreeConfig};

mod fixed;
pub use fixed::FixedDepthTree;

mod incremental;
pub use incremental::IncrementalTree;


/// The node values of a tree, level by level
///
/// `nodes[0]` holds the leaves and `nodes[depth]` holds the root once anything has been inserted.
/// Each level only stores the populated prefix: every slot past the end of a level is an empty
/// subtree, whose value is `zeros[level]`. This gives the same hashes as padding the leaves out to
/// the full capacity, without allocating `arity ^ depth` nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Levels {
    nodes: Vec<Vec<FieldElement>>,
    zeros: Vec<FieldElement>,
    arity: usize,
}

impl Levels {
    fn empty(config: &TreeConfig, hasher: &HashAdapter) -> Result<Self> {
        let zeros = hasher.zero_elements(config)?;

        Ok(Self {
            nodes: vec![Vec::new(); config.depth() + 1],
            zeros,
            arity: config.arity(),
        })
    }

    fn depth(&self) -> usize {
        self.nodes.len() - 1
    }

    fn leaves(&self) -> &[FieldElement] {
        &self.nodes[0]
    }

    fn node(&self, level: usize, index: usize) -> &FieldElement {
        self.nodes[level]
            .get(index)
            .unwrap_or(&self.zeros[level])
    }

    fn root(&self) -> &FieldElement {
        self.node(self.depth(), 0)
    }

    /// The values of the block of `arity` siblings at `level` that contains `index`
    fn block(&self, level: usize, index: usize) -> Vec<FieldElement> {
        let start = index - index % self.arity;
        (start..start + self.arity)
            .map(|i| self.node(level, i).clone())
            .collect()
    }

    /// Write a node, which must either already exist or be the next slot on its level
    fn set(&mut self, level: usize, index: usize, value: FieldElement) {
        let nodes = &mut self.nodes[level];

        match index.cmp(&nodes.len()) {
            core::cmp::Ordering::Less => nodes[index] = value,
            core::cmp::Ordering::Equal => nodes.push(value),
            core::cmp::Ordering::Greater => unreachable!("levels are filled left to right"),
        }
    }

    /// Collect the authentication path of the leaf at `index`
    fn proof(&self, index: usize) -> Result<Proof> {
        let len = self.leaves().len();
        let leaf = self
            .leaves()
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })?
            .clone();

        let mut path_elements = Vec::with_capacity(self.depth());
        let mut path_indices = Vec::with_capacity(self.depth());
        let mut current = index;

        for level in 0..self.depth() {
            let position = current % self.arity;
            let mut siblings = self.block(level, current);
            siblings.remove(position);

            path_elements.push(siblings);
            path_indices.push(position);
            current /= self.arity;
        }

        Ok(Proof::new(
            leaf,
            index,
            path_elements,
            path_indices,
            self.root().clone(),
        ))
    }
}
