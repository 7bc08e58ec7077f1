mod build;
mod load;
mod model;

pub use build::{TreeLimits, build_tree};
pub use load::{PosterError, parse_tree_source, read_tree_source};
pub use model::{DirectoryTree, NodeKind};
