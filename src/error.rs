use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced an HTTP status (DNS, TLS, connect, timeout).
    #[error("request never reached GitHub: {0}")]
    Transport(#[source] reqwest::Error),

    /// GitHub answered with a non-success status.
    #[error("GitHub API returned HTTP {status}{}", describe_service(.message, .documentation_url))]
    Service {
        status: u16,
        message: Option<String>,
        documentation_url: Option<String>,
    },

    /// Success status, but the body could not be understood.
    #[error("malformed response from GitHub: {reason}")]
    MalformedResponse { reason: String, excerpt: String },

    #[error(transparent)]
    Clone(#[from] CloneError),

    #[error(transparent)]
    Input(#[from] InputError),
}

impl Error {
    /// True when the failure happened before any HTTP status existed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// HTTP status of a service rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn describe_service(message: &Option<String>, documentation_url: &Option<String>) -> String {
    let mut out = String::new();
    if let Some(message) = message {
        out.push_str(": ");
        out.push_str(message);
    }
    if let Some(url) = documentation_url {
        out.push_str(" (see ");
        out.push_str(url);
        out.push(')');
    }
    out
}

#[derive(Debug, Error)]
pub enum CloneError {
    #[error("can't create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("git clone of {url} into {} failed: {}", .dest.display(), .source.message())]
    Git {
        url: String,
        dest: PathBuf,
        #[source]
        source: git2::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("search term cannot be empty")]
    EmptyTerm,

    #[error("no search yet, run `search` first")]
    NoActiveSearch,

    #[error("no results to download from, run `search` first")]
    NoResults,

    #[error("result #{index} doesn't exist, pick a number from 1 to {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("`{0}` is not a result number, enter an integer larger than 0")]
    InvalidIndex(String),
}
