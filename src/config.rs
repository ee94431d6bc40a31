use crate::api::DEFAULT_API_BASE;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const TOKEN_KEY: &str = "GITHUB_TOKEN";
pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_DOWNLOAD_DIR: &str = "packages";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub download_dir: PathBuf,
    pub env_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: DEFAULT_API_BASE.to_string(),
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
        }
    }
}

impl Config {
    /// Export the env file's `KEY=VALUE` pairs into the process environment.
    /// Variables that are already set win. Returns whether the file was read.
    pub fn load_env_file(&self) -> bool {
        match dotenv::from_path(&self.env_file) {
            Ok(()) => {
                debug!(path = %self.env_file.display(), "loaded env file");
                true
            }
            Err(dotenv::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => {
                warn!(path = %self.env_file.display(), "can't load env file: {}", e);
                false
            }
        }
    }

    /// `GITHUB_TOKEN` from the environment, if set to something non-blank.
    pub fn env_token() -> Option<String> {
        non_blank(std::env::var(TOKEN_KEY).ok())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Write `GITHUB_TOKEN=<token>` into the env file at `path`, replacing an
/// existing entry and keeping every other line.
pub fn persist_token(path: &Path, token: &str) -> io::Result<()> {
    let existing = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, upsert_token(&existing, token.trim()))
}

fn upsert_token(existing: &str, token: &str) -> String {
    let entry = format!("{}={}", TOKEN_KEY, token);
    let mut replaced = false;

    let mut lines: Vec<String> = existing
        .lines()
        .filter_map(|line| {
            let is_token = line
                .trim_start()
                .strip_prefix(TOKEN_KEY)
                .is_some_and(|rest| rest.trim_start().starts_with('='));
            match (is_token, replaced) {
                (false, _) => Some(line.to_string()),
                (true, false) => {
                    replaced = true;
                    Some(entry.clone())
                }
                (true, true) => None,
            }
        })
        .collect();

    if !replaced {
        lines.push(entry);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
