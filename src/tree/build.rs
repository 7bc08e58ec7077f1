use serde::Deserialize;
use serde_json::{Map, Value};

use super::model::{DirectoryTree, NodeKind, TreeEdge, TreeNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeLimits {
    pub max_nodes: usize,
    pub max_depth: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_nodes: 1000,
            max_depth: 12,
        }
    }
}

struct TreeWalker {
    limits: TreeLimits,
    tree: DirectoryTree,
}

impl TreeWalker {
    fn walk(&mut self, object: &Map<String, Value>, parent: Option<usize>, depth: usize) {
        if depth >= self.limits.max_depth {
            return;
        }

        let sibling_count = object.len();
        for (index_in_parent, (key, value)) in object.iter().enumerate() {
            if self.tree.nodes.len() >= self.limits.max_nodes {
                self.tree.truncated = true;
                return;
            }

            let id = match parent {
                Some(parent_index) => format!("{}/{key}", self.tree.nodes[parent_index].id),
                None => key.clone(),
            };
            let kind = if value.is_object() {
                NodeKind::Directory
            } else {
                NodeKind::File
            };

            let index = self.tree.nodes.len();
            self.tree.nodes.push(TreeNode {
                id,
                name: key.clone(),
                kind,
                depth,
                index_in_parent,
                sibling_count,
                parent,
                children: Vec::new(),
            });

            match parent {
                Some(parent_index) => {
                    self.tree.nodes[parent_index].children.push(index);
                    self.tree.edges.push(TreeEdge {
                        from: parent_index,
                        to: index,
                    });
                }
                None => self.tree.roots.push(index),
            }

            if let Value::Object(children) = value {
                self.walk(children, Some(index), depth + 1);
            }
        }
    }
}

/// Flattens nested JSON into a node arena and edge list.
///
/// Objects are directories, every other value is a file. Keys past the
/// node cap or depth cap are dropped; only the node cap marks the tree as
/// truncated. A non-object root yields an empty tree.
pub fn build_tree(raw: &Value, limits: TreeLimits) -> DirectoryTree {
    let mut walker = TreeWalker {
        limits,
        tree: DirectoryTree {
            node_cap: limits.max_nodes,
            ..DirectoryTree::default()
        },
    };

    if let Value::Object(root) = raw {
        walker.walk(root, None, 0);
    }

    walker.tree
}
