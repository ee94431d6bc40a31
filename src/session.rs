use crate::api::ApiClient;
use crate::clone::{CloneDispatcher, CloneReport};
use crate::config::Config;
use crate::error::{Error, InputError, Result};
use crate::mapper;
use crate::pagination::Paginator;
use crate::query::SearchRequest;
use crate::types::{RepositoryRecord, SearchPage};
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

/// What a completed search or page turn produced. The records themselves
/// live in [`Session::results`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub page: u32,
    pub count: usize,
    pub total_count: Option<u64>,
    pub diagnostic: Option<String>,
}

/// Everything one interactive run needs: HTTP client, token, the last query
/// and the results currently on screen.
pub struct Session {
    client: ApiClient,
    paginator: Paginator,
    results: Vec<RepositoryRecord>,
    token: Option<String>,
    env_file: PathBuf,
    dispatcher: CloneDispatcher,
}

impl Session {
    pub fn new(client: ApiClient, config: &Config, token: Option<String>) -> Self {
        Session {
            client,
            paginator: Paginator::new(),
            results: Vec::new(),
            token,
            env_file: config.env_file.clone(),
            dispatcher: CloneDispatcher::new(config.download_dir.clone()),
        }
    }

    pub fn results(&self) -> &[RepositoryRecord] {
        &self.results
    }

    pub fn current_page(&self) -> Option<u32> {
        self.paginator.current_page()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Use `token` from now on and write it to the env file. A blank token
    /// drops authentication. The session keeps the token even if saving fails.
    pub fn set_token(&mut self, token: &str) -> io::Result<()> {
        let token = token.trim();
        self.token = (!token.is_empty()).then(|| token.to_string());
        if token.is_empty() {
            warn!("authorization token is empty, requests will be unauthenticated");
        }
        crate::config::persist_token(&self.env_file, token)
    }

    /// Fresh search starting on page 1.
    pub fn search(&mut self, term: &str, qualifiers: &[String]) -> Result<SearchOutcome> {
        self.search_at(term, qualifiers, 1)
    }

    pub fn search_at(&mut self, term: &str, qualifiers: &[String], page: u32) -> Result<SearchOutcome> {
        self.results.clear();
        let request = match SearchRequest::new(term, qualifiers) {
            Ok(request) => request.with_page(page),
            Err(e) => {
                self.paginator.reset();
                return Err(e);
            }
        };
        let request = self.paginator.start(request);
        self.run(&request)
    }

    pub fn next_page(&mut self) -> Result<SearchOutcome> {
        let request = self.paginator.next_page()?;
        self.results.clear();
        self.run(&request)
    }

    pub fn previous_page(&mut self) -> Result<SearchOutcome> {
        let request = self.paginator.previous_page()?;
        self.results.clear();
        self.run(&request)
    }

    fn run(&mut self, request: &SearchRequest) -> Result<SearchOutcome> {
        let fetched = self.fetch(request);
        self.paginator.finish(fetched.is_ok());
        let page = fetched?;

        self.results = page.records;
        Ok(SearchOutcome {
            page: request.page,
            count: self.results.len(),
            total_count: page.total_count,
            diagnostic: page.diagnostic,
        })
    }

    fn fetch(&self, request: &SearchRequest) -> Result<SearchPage> {
        let url = request.url(self.client.base_url());
        info!(term = %request.term, page = request.page, "searching repositories");

        let response = self
            .client
            .execute(&url, self.token())
            .map_err(Error::Transport)?;

        if !response.is_success() {
            let (message, documentation_url) = mapper::service_message(&response.body);
            warn!(
                status = response.status,
                message = message.as_deref().unwrap_or("-"),
                documentation_url = documentation_url.as_deref().unwrap_or("-"),
                "GitHub rejected the search"
            );
            return Err(Error::Service {
                status: response.status,
                message,
                documentation_url,
            });
        }

        match mapper::parse(&response.body) {
            Err(Error::MalformedResponse { reason, excerpt }) => {
                warn!(%reason, body = %excerpt, "could not parse search response");
                Ok(SearchPage {
                    diagnostic: Some(format!("could not parse GitHub response: {}", reason)),
                    ..SearchPage::default()
                })
            }
            parsed => parsed,
        }
    }

    /// Clone the 1-based `index`-th result. Stored results are untouched.
    pub fn download(&self, index: usize) -> Result<CloneReport> {
        let record = self.select(index)?;
        Ok(self
            .dispatcher
            .clone_repo(&record.html_url, &record.full_name)?)
    }

    pub fn select(&self, index: usize) -> Result<&RepositoryRecord> {
        if self.results.is_empty() {
            return Err(InputError::NoResults.into());
        }
        index
            .checked_sub(1)
            .and_then(|i| self.results.get(i))
            .ok_or_else(|| {
                InputError::IndexOutOfRange {
                    index,
                    len: self.results.len(),
                }
                .into()
            })
    }
}
