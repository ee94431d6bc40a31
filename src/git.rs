use git2::Repository;
use std::path::Path;

/// Full (non-shallow) clone of `url` into `dest`, with a checked-out working tree.
pub fn clone(url: &str, dest: &Path) -> Result<Repository, git2::Error> {
    Repository::clone(url, dest)
}

/// Get the current commit hash of a git repository
pub fn head_commit(repo: &Repository) -> Option<String> {
    repo.head()
        .ok()?
        .target()
        .map(|oid| oid.to_string())
}

/// Get the remote URL of a git repository
pub fn origin_url(repo: &Repository) -> Option<String> {
    repo.find_remote("origin")
        .ok()?
        .url()
        .map(str::to_string)
}
