use crate::error::CloneError;
use crate::git;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where a finished clone landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneReport {
    pub path: PathBuf,
    pub head: Option<String>,
    pub origin: Option<String>,
}

/// Clones selected search hits under a single download root.
#[derive(Debug, Clone)]
pub struct CloneDispatcher {
    root: PathBuf,
}

impl CloneDispatcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CloneDispatcher { root: root.into() }
    }

    /// Where `display_name` would be cloned to.
    pub fn destination(&self, display_name: &str) -> PathBuf {
        self.root.join(sanitize_name(display_name))
    }

    pub fn clone_repo(&self, remote_url: &str, display_name: &str) -> Result<CloneReport, CloneError> {
        ensure_dir(&self.root)?;

        let dest = self.destination(display_name);
        if let Some(parent) = dest.parent() {
            ensure_dir(parent)?;
        }

        info!(url = remote_url, dest = %dest.display(), "cloning");
        let repo = git::clone(remote_url, &dest).map_err(|source| CloneError::Git {
            url: remote_url.to_string(),
            dest: dest.clone(),
            source,
        })?;

        Ok(CloneReport {
            head: git::head_commit(&repo),
            origin: git::origin_url(&repo),
            path: dest,
        })
    }
}

fn ensure_dir(path: &Path) -> Result<(), CloneError> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|source| CloneError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "created directory");
    Ok(())
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || (c as u32) < 32
}

/// Replace every character that is unsafe in a single path component with `_`.
/// Runs are not collapsed, so `a/b:c*d` becomes `a_b_c_d`.
pub fn sanitize_name(display_name: &str) -> String {
    let name: String = display_name
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();

    // "", "." and ".." would resolve to the root or above it.
    if name.chars().all(|c| c == '.') {
        format!("_{}", name)
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit_file(repo: &git2::Repository, path: &str, content: &[u8]) -> git2::Oid {
        let workdir = repo.workdir().unwrap();
        fs::write(workdir.join(path), content).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(path)).unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();

        let sig = git2::Signature::now("t", "t@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])
            .unwrap()
    }

    #[test]
    fn sanitizes_each_character() {
        assert_eq!(sanitize_name("a/b:c*d"), "a_b_c_d");
        assert_eq!(sanitize_name(r#"x\y?"z"<>|"#), "x_y__z____");
        assert_eq!(sanitize_name("tab\there\n"), "tab_here_");
        assert_eq!(sanitize_name("tokio-rs/axum"), "tokio-rs_axum");
        assert_eq!(sanitize_name("ünïcode.rs"), "ünïcode.rs");
    }

    #[test]
    fn dot_names_stay_below_root() {
        assert_eq!(sanitize_name(""), "_");
        assert_eq!(sanitize_name("."), "_.");
        assert_eq!(sanitize_name(".."), "_..");
        assert_eq!(sanitize_name("../.."), ".._..");

        let dispatcher = CloneDispatcher::new("/tmp/packages");
        assert_eq!(dispatcher.destination("../etc"), PathBuf::from("/tmp/packages/.._etc"));
    }

    #[test]
    fn clones_into_sanitized_path_under_new_root() {
        let origin_dir = tempfile::tempdir().unwrap();
        let origin = git2::Repository::init(origin_dir.path()).unwrap();
        let commit = commit_file(&origin, "README.md", b"hello");

        let work = tempfile::tempdir().unwrap();
        let root = work.path().join("nested").join("packages");
        let dispatcher = CloneDispatcher::new(&root);

        let url = origin_dir.path().to_string_lossy().to_string();
        let report = dispatcher.clone_repo(&url, "octo/hello").unwrap();

        assert_eq!(report.path, root.join("octo_hello"));
        assert_eq!(report.head, Some(commit.to_string()));
        assert_eq!(report.origin.as_deref(), Some(url.as_str()));
        assert_eq!(fs::read(report.path.join("README.md")).unwrap(), b"hello");
    }

    #[test]
    fn clone_failure_reports_git_error() {
        let work = tempfile::tempdir().unwrap();
        let dispatcher = CloneDispatcher::new(work.path().join("packages"));
        let missing = work.path().join("no-such-repo");

        let err = dispatcher
            .clone_repo(&missing.to_string_lossy(), "ghost/repo")
            .unwrap_err();

        assert!(matches!(err, CloneError::Git { .. }), "{err:?}");
        assert!(err.to_string().contains("git clone of"));
        assert!(dispatcher.root.is_dir());
    }

    #[test]
    fn root_that_is_a_file_fails_to_create() {
        let work = tempfile::tempdir().unwrap();
        let blocker = work.path().join("packages");
        fs::write(&blocker, b"not a dir").unwrap();

        let err = CloneDispatcher::new(&blocker)
            .clone_repo("https://github.com/octo/hello", "octo/hello")
            .unwrap_err();

        assert!(matches!(err, CloneError::CreateDir { .. }), "{err:?}");
    }
}
