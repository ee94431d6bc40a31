pub mod download;
pub mod misc;
pub mod repl;
pub mod search;

pub use misc::generate_completions;
pub use repl::Repl;
pub use search::search_repos;
