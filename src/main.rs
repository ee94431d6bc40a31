mod api;
mod clone;
mod commands;
mod config;
mod error;
mod git;
mod mapper;
mod pagination;
mod query;
mod session;
mod types;

use anyhow::Context;
use api::ApiClient;
use clap::{Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use config::{Config, DEFAULT_DOWNLOAD_DIR, DEFAULT_ENV_FILE};
use session::Session;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gitsearch")]
#[command(about = "Search GitHub repositories and clone the ones worth keeping", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory that downloaded repositories are cloned into
    #[arg(long, global = true, env = "GITSEARCH_DOWNLOAD_DIR", default_value = DEFAULT_DOWNLOAD_DIR, value_hint = ValueHint::DirPath)]
    download_dir: PathBuf,

    /// Env file holding GITHUB_TOKEN, loaded at start and written by `at`
    #[arg(long, global = true, env = "GITSEARCH_ENV_FILE", default_value = DEFAULT_ENV_FILE, value_hint = ValueHint::FilePath)]
    env_file: PathBuf,

    /// GitHub API base URL
    #[arg(long, global = true, env = "GITSEARCH_API_URL", default_value = api::DEFAULT_API_BASE, hide = true)]
    api_url: String,

    /// Log debug diagnostics to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single search and print the results
    #[command(short_flag = 'S', visible_alias = "find")]
    Search {
        /// Search term (e.g., "cpp web server")
        #[arg(long = "search", short = 's')]
        term: Option<String>,
        /// Search qualifier, repeatable (e.g., -q "stars:>500" -q "language:C++")
        #[arg(short = 'q', long = "qualifier")]
        qualifiers: Vec<String>,
        /// Page of results to fetch
        #[arg(long, short = 'p', default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            api_base: self.api_url.clone(),
            download_dir: self.download_dir.clone(),
            env_file: self.env_file.clone(),
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,gitsearch=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_session(config: &Config) -> anyhow::Result<Session> {
    config.load_env_file();
    let token = Config::env_token();
    info!(authenticated = token.is_some(), "starting session");

    let client = ApiClient::with_base_url(&config.api_base)
        .context("failed to initialize the HTTP transport")?;
    Ok(Session::new(client, config, token))
}

fn usage() {
    eprintln!("Usage: gitsearch search -s \"search term\" [-q \"qualifier\"]... [-p page]");
    eprintln!("Example: gitsearch search -s \"cpp web server\" -q \"stars:>500\" -q \"language:C++\"");
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = cli.config();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            commands::generate_completions(shell);
            ExitCode::SUCCESS
        }
        Some(Commands::Search {
            term,
            qualifiers,
            page,
            json,
        }) => {
            let Some(term) = term.filter(|t| !t.trim().is_empty()) else {
                usage();
                return ExitCode::FAILURE;
            };
            let mut session = match open_session(&config) {
                Ok(session) => session,
                Err(e) => {
                    error!("{:#}", e);
                    return ExitCode::FAILURE;
                }
            };
            if !session.has_token() {
                eprintln!("No GitHub API token found in environment. You may be rate-limited.");
            }
            if commands::search_repos(&mut session, &term, &qualifiers, page, json) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        None => {
            let session = match open_session(&config) {
                Ok(session) => session,
                Err(e) => {
                    eprintln!("CRITICAL ERROR: {:#}", e);
                    return ExitCode::FAILURE;
                }
            };
            let stdin = io::stdin();
            match commands::Repl::new(stdin.lock(), session).run() {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("terminal I/O failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
