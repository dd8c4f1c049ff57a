//! Depth-limited directory trees.
//!
//! [`build`] walks the filesystem into a [`Tree`]; formatting it with
//! `Display` is a separate, purely presentational step.

use crate::dirs::require_dir;
use crate::entry::{self, DirEntry, EntryKind};
use crate::error::FsError;
use crate::validate::ResolvedPath;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

const BRANCH: &str = "├── ";
const TERMINAL: &str = "└── ";
const CONTINUATION: &str = "│   ";
const BLANK: &str = "    ";

/// An entry plus its children, in name order.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    #[serde(flatten)]
    pub entry: DirEntry,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

/// The tree below one queried directory.
#[derive(Debug, Clone, Serialize)]
pub struct Tree {
    /// The path as the caller wrote it.
    pub path: String,
    pub nodes: Vec<TreeNode>,
}

/// Walk the directory at `path` into a [`Tree`].
///
/// The queried directory is depth 0 and its children are always listed.
/// A directory at depth `d` is only descended into while `d < max_depth`;
/// at the boundary it is still listed, without children. `None` means
/// unlimited. Any error below the root aborts the whole walk.
pub async fn build(
    path: &ResolvedPath,
    display: &str,
    max_depth: Option<usize>,
) -> Result<Tree, FsError> {
    require_dir(path).await?;
    let nodes = walk(path.to_path_buf(), 0, max_depth).await?;
    Ok(Tree {
        path: display.to_owned(),
        nodes,
    })
}

fn walk(
    dir: PathBuf,
    depth: usize,
    max_depth: Option<usize>,
) -> Pin<Box<dyn Future<Output = Result<Vec<TreeNode>, FsError>> + Send>> {
    Box::pin(async move {
        let entries = entry::read_entries(&dir).await?;
        let child_depth = depth + 1;
        let mut nodes = Vec::with_capacity(entries.len());
        for entry in entries {
            let descend = entry.kind == EntryKind::Directory
                && max_depth.is_none_or(|max| child_depth < max);
            let children = if descend {
                walk(dir.join(&entry.name), child_depth, max_depth).await?
            } else {
                Vec::new()
            };
            nodes.push(TreeNode { entry, children });
        }
        Ok(nodes)
    })
}

fn render(f: &mut fmt::Formatter<'_>, nodes: &[TreeNode], prefix: &str) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        let (connector, continuation) = if i + 1 == nodes.len() {
            (TERMINAL, BLANK)
        } else {
            (BRANCH, CONTINUATION)
        };
        writeln!(f, "{prefix}{connector}{}", node.entry)?;
        if !node.children.is_empty() {
            render(f, &node.children, &format!("{prefix}{continuation}"))?;
        }
    }
    Ok(())
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tree view of directory: {}", self.path)?;
        writeln!(f)?;
        if self.nodes.is_empty() {
            return f.write_str("(empty directory)");
        }
        render(f, &self.nodes, "")
    }
}

#[cfg(test)]
mod tests {
    use crate::config::WorkspaceConfig;
    use crate::error::ErrorKind;
    use crate::tree::{build, walk};
    use std::fs;

    fn workspace() -> (tempfile::TempDir, WorkspaceConfig) {
        let tmp = tempfile::tempdir().unwrap();
        let config = WorkspaceConfig::new(tmp.path()).unwrap();
        (tmp, config)
    }

    /// `a/b/c.txt` (5 bytes), `a/d.txt` (2 bytes), `e/`, `z.txt` (0 bytes).
    fn populate(ws: &WorkspaceConfig) {
        let root = ws.root();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::create_dir(root.join("e")).unwrap();
        fs::write(root.join("a/b/c.txt"), "hello").unwrap();
        fs::write(root.join("a/d.txt"), "hi").unwrap();
        fs::write(root.join("z.txt"), "").unwrap();
    }

    #[tokio::test]
    async fn single_chain_uses_terminal_connectors() {
        let (_tmp, ws) = workspace();
        fs::create_dir_all(ws.root().join("a/b")).unwrap();
        fs::write(ws.root().join("a/b/c.txt"), "hello").unwrap();

        let tree = build(&ws.resolve("").unwrap(), "", None).await.unwrap();
        assert_eq!(
            tree.to_string(),
            "Tree view of directory: \n\n\
             └── a/\n\
             \x20   └── b/\n\
             \x20       └── c.txt (5 bytes)\n"
        );
    }

    #[tokio::test]
    async fn unlimited_depth_renders_everything() {
        let (_tmp, ws) = workspace();
        populate(&ws);

        let tree = build(&ws.resolve("/").unwrap(), "/", None).await.unwrap();
        let expected = [
            "Tree view of directory: /",
            "",
            "├── a/",
            "│   ├── b/",
            "│   │   └── c.txt (5 bytes)",
            "│   └── d.txt (2 bytes)",
            "├── e/",
            "└── z.txt (0 bytes)",
        ];
        assert_eq!(tree.to_string().lines().collect::<Vec<_>>(), expected);
    }

    #[tokio::test]
    async fn zero_depth_lists_only_immediate_children() {
        let (_tmp, ws) = workspace();
        populate(&ws);

        let tree = build(&ws.resolve("").unwrap(), "", Some(0)).await.unwrap();
        let names: Vec<_> = tree.nodes.iter().map(|n| n.entry.name.as_str()).collect();
        assert_eq!(names, ["a", "e", "z.txt"]);
        assert!(tree.nodes.iter().all(|n| n.children.is_empty()));
        assert!(!tree.to_string().contains("c.txt"));
    }

    #[tokio::test]
    async fn depth_limit_keeps_boundary_directory() {
        let (_tmp, ws) = workspace();
        populate(&ws);

        let tree = build(&ws.resolve("").unwrap(), "", Some(2)).await.unwrap();
        let text = tree.to_string();
        assert!(text.contains("│   ├── b/\n"));
        assert!(!text.contains("c.txt"));
    }

    #[tokio::test]
    async fn subdirectory_tree() {
        let (_tmp, ws) = workspace();
        populate(&ws);

        let tree = build(&ws.resolve("a").unwrap(), "a", None).await.unwrap();
        let expected = [
            "Tree view of directory: a",
            "",
            "├── b/",
            "│   └── c.txt (5 bytes)",
            "└── d.txt (2 bytes)",
        ];
        assert_eq!(tree.to_string().lines().collect::<Vec<_>>(), expected);
    }

    #[tokio::test]
    async fn empty_directory_says_so() {
        let (_tmp, ws) = workspace();
        let tree = build(&ws.resolve("").unwrap(), "", None).await.unwrap();
        assert!(tree.to_string().ends_with("(empty directory)"));
    }

    #[tokio::test]
    async fn file_root_is_type_mismatch() {
        let (_tmp, ws) = workspace();
        populate(&ws);
        let err = build(&ws.resolve("z.txt").unwrap(), "z.txt", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[tokio::test]
    async fn missing_root_is_not_found() {
        let (_tmp, ws) = workspace();
        let err = build(&ws.resolve("nope").unwrap(), "nope", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn vanished_subdirectory_aborts_walk() {
        let (_tmp, ws) = workspace();
        populate(&ws);
        let gone = ws.root().join("a/gone");

        let err = walk(gone.clone(), 1, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains(&gone.display().to_string()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_subdirectory_is_io_error() {
        use std::os::unix::fs::PermissionsExt;

        let (_tmp, ws) = workspace();
        populate(&ws);
        let locked = ws.root().join("a/locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind a privileged user.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = build(&ws.resolve("").unwrap(), "", None).await;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("locked"));
    }
}
