#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}

#[derive(Clone, Debug)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub depth: usize,
    pub index_in_parent: usize,
    pub sibling_count: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// Parent to child link between two arena indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeEdge {
    pub from: usize,
    pub to: usize,
}

/// Flat node arena produced by the tree walk.
///
/// Nodes are stored in depth-first pre-order, so a parent always precedes
/// its children and `children` lists keep the original key order.
#[derive(Clone, Debug, Default)]
pub struct DirectoryTree {
    pub nodes: Vec<TreeNode>,
    pub edges: Vec<TreeEdge>,
    pub roots: Vec<usize>,
    pub truncated: bool,
    pub node_cap: usize,
}

impl DirectoryTree {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    pub fn is_leaf(&self, index: usize) -> bool {
        self.nodes
            .get(index)
            .is_none_or(|node| node.children.is_empty())
    }

    pub fn directory_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Directory)
            .count()
    }

    pub fn file_count(&self) -> usize {
        self.nodes.len() - self.directory_count()
    }

    /// Number of leaves below each node, counting a leaf as one.
    pub fn leaf_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.nodes.len()];
        for index in (0..self.nodes.len()).rev() {
            let node = &self.nodes[index];
            counts[index] = if node.children.is_empty() {
                1
            } else {
                node.children.iter().map(|&child| counts[child]).sum()
            };
        }
        counts
    }

    pub fn total_leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.children.is_empty())
            .count()
    }

    pub fn truncation_message(&self) -> Option<String> {
        self.truncated
            .then(|| format!("Showing first {} nodes", self.node_cap))
    }
}
