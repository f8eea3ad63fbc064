//! Directory listing for the file browser.
//!
//! Listing goes through the [`ignore`] walker so hidden files are filtered
//! the same way everywhere.  `.gitignore` rules only apply when asked for;
//! by default every entry `cd` could reach is listed.

use std::path::Path;

use ignore::WalkBuilder;

use super::tree::{Entry, FileTree, NodeId};

#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// How many levels below the root are listed eagerly (0 = root only).
    pub max_depth: usize,
    /// Hide what `.gitignore` and friends exclude.
    pub respect_gitignore: bool,
    pub show_hidden: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            respect_gitignore: false,
            show_hidden: false,
        }
    }
}

/// Build a tree rooted at `root`.  The root is always expanded.
pub fn build_tree(root: &Path, config: &WalkConfig) -> anyhow::Result<FileTree> {
    let mut tree = FileTree::new(Entry::from_path(root)?);
    let root_id = tree.root;
    populate(&mut tree, root_id, config, 0);
    Ok(tree)
}

/// List a directory that has not been loaded yet.  No-op for files and for
/// directories whose children are already present.
pub fn expand_node(tree: &mut FileTree, id: NodeId, config: &WalkConfig) {
    let node = tree.get(id);
    if !node.entry.is_dir || node.loaded {
        return;
    }
    let depth = node.depth;
    // Only the requested level; deeper levels load on demand.
    let one_level = WalkConfig {
        max_depth: depth + 1,
        ..config.clone()
    };
    populate(tree, id, &one_level, depth);
}

/// Immediate children of `dir`: directories first, then files, each sorted
/// case-insensitively.
pub fn list_dir(dir: &Path, config: &WalkConfig) -> Vec<Entry> {
    let walker = WalkBuilder::new(dir)
        .max_depth(Some(1))
        .hidden(!config.show_hidden)
        .git_ignore(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .ignore(config.respect_gitignore)
        .parents(config.respect_gitignore)
        .build();

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in walker.flatten() {
        let path = entry.path();
        if path == dir {
            continue;
        }
        match Entry::from_path(path) {
            Ok(e) if e.is_dir => dirs.push(e),
            Ok(e) => files.push(e),
            // Dangling symlinks and races with deletion.
            Err(err) => tracing::debug!("skip {}: {err}", path.display()),
        }
    }

    dirs.sort_by_key(|e| e.name.to_lowercase());
    files.sort_by_key(|e| e.name.to_lowercase());
    dirs.extend(files);
    dirs
}

fn populate(tree: &mut FileTree, parent: NodeId, config: &WalkConfig, depth: usize) {
    if depth >= config.max_depth {
        return;
    }
    let dir = tree.get(parent).entry.path.clone();
    for entry in list_dir(&dir, config) {
        let is_dir = entry.is_dir;
        let child = tree.add_child(parent, entry);
        if is_dir {
            populate(tree, child, config, depth + 1);
        }
    }
    tree.get_mut(parent).loaded = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("termy-fs-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn names(tree: &FileTree, id: NodeId) -> Vec<String> {
        tree.get(id)
            .children
            .iter()
            .map(|&c| tree.get(c).entry.name.clone())
            .collect()
    }

    #[test]
    fn dirs_sort_before_files() {
        let dir = scratch("sort");
        std::fs::write(dir.join("b.txt"), "x").unwrap();
        std::fs::write(dir.join("A.txt"), "x").unwrap();
        std::fs::create_dir(dir.join("zeta")).unwrap();
        std::fs::write(dir.join(".hidden"), "x").unwrap();

        let tree = build_tree(&dir, &WalkConfig::default()).unwrap();
        assert_eq!(names(&tree, tree.root), ["zeta", "A.txt", "b.txt"]);

        let shown = WalkConfig {
            show_hidden: true,
            ..WalkConfig::default()
        };
        let tree = build_tree(&dir, &shown).unwrap();
        assert!(names(&tree, tree.root).contains(&".hidden".to_string()));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn gitignored_entries_are_listed_unless_asked() {
        let dir = scratch("gitignore");
        std::fs::create_dir(dir.join(".git")).unwrap();
        std::fs::write(dir.join(".gitignore"), "target\n").unwrap();
        std::fs::create_dir(dir.join("target")).unwrap();
        std::fs::write(dir.join("main.rs"), "").unwrap();

        let tree = build_tree(&dir, &WalkConfig::default()).unwrap();
        assert_eq!(names(&tree, tree.root), ["target", "main.rs"]);

        let shown = WalkConfig {
            show_hidden: true,
            ..WalkConfig::default()
        };
        let tree = build_tree(&dir, &shown).unwrap();
        assert_eq!(
            names(&tree, tree.root),
            [".git", "target", ".gitignore", "main.rs"]
        );

        let filtered = WalkConfig {
            respect_gitignore: true,
            ..WalkConfig::default()
        };
        let tree = build_tree(&dir, &filtered).unwrap();
        assert_eq!(names(&tree, tree.root), ["main.rs"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn expand_loads_one_level() {
        let dir = scratch("expand");
        std::fs::create_dir_all(dir.join("a/b/c")).unwrap();

        let mut tree = build_tree(&dir, &WalkConfig::default()).unwrap();
        let a = tree.get(tree.root).children[0];
        assert!(!tree.get(a).loaded);

        expand_node(&mut tree, a, &WalkConfig::default());
        assert_eq!(names(&tree, a), ["b"]);
        let b = tree.get(a).children[0];
        assert!(!tree.get(b).loaded);

        // Second call leaves the node untouched.
        expand_node(&mut tree, a, &WalkConfig::default());
        assert_eq!(tree.get(a).children.len(), 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
