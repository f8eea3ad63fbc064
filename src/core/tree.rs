//! Arena-backed model of the file browser pane.
//!
//! Each [`TreeNode`] stores one directory entry and refers to its parent and
//! children by index into [`FileTree::nodes`].

use std::path::{Path, PathBuf};

// ───────────────────────────────────────── entry ─────────────

/// What the browser needs to know about a single filesystem entry.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub size: u64,
}

impl Entry {
    /// Stat `path` (following symlinks for the dir check).
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        let is_symlink = std::fs::symlink_metadata(path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            // `/` and drive roots have no file name.
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            path: path.to_path_buf(),
            is_dir: meta.is_dir(),
            is_symlink,
            size: meta.len(),
        })
    }
}

// ───────────────────────────────────────── node ──────────────

/// Index into [`FileTree::nodes`].
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub entry: Entry,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Only meaningful for directories.
    pub expanded: bool,
    /// `true` once the children of a directory have been listed.
    pub loaded: bool,
    pub depth: usize,
}

// ───────────────────────────────────────── tree ──────────────

#[derive(Debug, Clone)]
pub struct FileTree {
    pub nodes: Vec<TreeNode>,
    pub root: NodeId,
}

impl FileTree {
    pub fn new(root: Entry) -> Self {
        Self {
            nodes: vec![TreeNode {
                entry: root,
                parent: None,
                children: Vec::new(),
                expanded: true,
                loaded: false,
                depth: 0,
            }],
            root: 0,
        }
    }

    pub fn add_child(&mut self, parent: NodeId, entry: Entry) -> NodeId {
        let depth = self.nodes[parent].depth + 1;
        let id = self.nodes.len();
        self.nodes.push(TreeNode {
            entry,
            parent: Some(parent),
            children: Vec::new(),
            expanded: false,
            loaded: false,
            depth,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Flattened list of nodes whose ancestors are all expanded, in display
    /// order.
    pub fn visible_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            let node = &self.nodes[id];
            if node.expanded {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id]
    }

    pub fn root_path(&self) -> &Path {
        &self.nodes[self.root].entry.path
    }

    pub fn find(&self, path: &Path) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.entry.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool) -> Entry {
        Entry {
            name: name.to_string(),
            path: PathBuf::from("/r").join(name),
            is_dir,
            is_symlink: false,
            size: 0,
        }
    }

    #[test]
    fn collapsed_children_are_hidden() {
        let mut tree = FileTree::new(entry("", true));
        let a = tree.add_child(tree.root, entry("a", true));
        let _a1 = tree.add_child(a, entry("a/1", false));
        let b = tree.add_child(tree.root, entry("b", false));

        assert_eq!(tree.visible_nodes(), vec![0, a, b]);

        tree.get_mut(a).expanded = true;
        assert_eq!(tree.visible_nodes(), vec![0, a, 2, b]);
        assert_eq!(tree.get(2).depth, 2);
    }

    #[test]
    fn find_by_path() {
        let mut tree = FileTree::new(entry("", true));
        let a = tree.add_child(tree.root, entry("a", true));
        assert_eq!(tree.find(Path::new("/r/a")), Some(a));
        assert_eq!(tree.find(Path::new("/r/missing")), None);
    }
}
