use std::error::Error;
use std::fmt;

use crate::geometry::Aabb;
use crate::scene::PrimitiveSource;

use super::Node;

/// Divisor factor of the growth budget that rules out placement
/// candidates during branch insertion. Tree shape depends on this value;
/// changing it changes where primitives land, not just performance.
pub const DEFAULT_GROWTH_FACTOR: f32 = 0.75;

/// Tree shape parameters, fixed for the lifetime of a [`Tree`].
#[derive(Copy, Clone, Debug)]
pub struct Config {
    /// Branch fanout; every branch holds exactly this many children.
    pub max_child_nodes: usize,
    /// Leaf slot capacity.
    pub max_values_per_node: usize,
    /// See [`DEFAULT_GROWTH_FACTOR`].
    pub growth_factor: f32,
}

impl Config {
    pub fn new(max_child_nodes: usize, max_values_per_node: usize) -> Self {
        Self {
            max_child_nodes,
            max_values_per_node,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(2, 4)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// Both capacities must be at least 2, or seed selection has no pair
    /// to anchor a split with.
    BadConfig {
        max_child_nodes: usize,
        max_values_per_node: usize,
    },
    /// The index does not address anything in the primitive source.
    IndexOutOfRange { index: u32, len: usize },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::BadConfig {
                max_child_nodes,
                max_values_per_node,
            } => write!(
                f,
                "tree config needs max_child_nodes >= 2 and max_values_per_node >= 2, \
                 got {max_child_nodes} and {max_values_per_node}"
            ),
            TreeError::IndexOutOfRange { index, len } => {
                write!(f, "primitive index {index} out of range for source of {len}")
            }
        }
    }
}

impl Error for TreeError {}

/// The spatial index: owns the node tree, borrows the primitive
/// collection it indexes. Built once per scene by repeated [`insert`];
/// there is no removal. [`encode`] flattens the whole tree into the
/// buffer the rendering backend consumes.
///
/// [`insert`]: Tree::insert
/// [`encode`]: Tree::encode
pub struct Tree<'a, S: PrimitiveSource + ?Sized> {
    source: &'a S,
    config: Config,
    root: Node,
    inserted: usize,
}

impl<'a, S: PrimitiveSource + ?Sized> Tree<'a, S> {
    pub fn new(source: &'a S, config: Config) -> Result<Self, TreeError> {
        if config.max_child_nodes < 2 || config.max_values_per_node < 2 {
            return Err(TreeError::BadConfig {
                max_child_nodes: config.max_child_nodes,
                max_values_per_node: config.max_values_per_node,
            });
        }
        Ok(Self {
            source,
            config,
            root: Node::empty_leaf(config.max_values_per_node),
            inserted: 0,
        })
    }

    /// Inserts the primitive at `index` in the source. The range check
    /// runs before any tree mutation, so a rejected insert leaves the
    /// tree untouched.
    pub fn insert(&mut self, index: u32) -> Result<(), TreeError> {
        let len = self.source.len();
        if index as usize >= len {
            return Err(TreeError::IndexOutOfRange { index, len });
        }
        let item = self.source.bounds(index);
        self.root.insert(index, item, self.source, &self.config);
        self.inserted += 1;
        Ok(())
    }

    /// Number of primitives inserted so far.
    pub fn len(&self) -> usize {
        self.inserted
    }

    pub fn is_empty(&self) -> bool {
        self.inserted == 0
    }

    pub fn bounds(&self) -> Aabb {
        self.root.bounds()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Flattens the tree into the consumer's buffer layout. Two encodes
    /// of the same tree yield identical sequences.
    pub fn encode(&self) -> Vec<f32> {
        let mut out = Vec::new();
        self.root.encode_into(&mut out);
        out
    }

    /// The encoded sequence as raw bytes, ready for a verbatim GPU
    /// buffer write.
    pub fn encode_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.encode()).to_vec()
    }
}
