pub mod encode;
pub mod node;
pub mod tree;
pub use encode::{BRANCH_FLAG, LEAF_FLAG};
pub use node::Node;
pub use tree::{Config, Tree, TreeError, DEFAULT_GROWTH_FACTOR};
