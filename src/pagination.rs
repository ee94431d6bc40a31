use crate::error::{InputError, Result};
use crate::query::SearchRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// No query issued yet, or the last fresh search failed.
    Idle,
    /// A request is in flight. `fresh` is false for page navigation.
    Searching { request: SearchRequest, fresh: bool },
    Viewing { request: SearchRequest },
}

/// Remembers the last query so `np`/`pp` can replay it on another page.
#[derive(Debug, Clone)]
pub struct Paginator {
    state: PageState,
}

impl Default for Paginator {
    fn default() -> Self {
        Paginator {
            state: PageState::Idle,
        }
    }
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> Option<u32> {
        self.current().map(|r| r.page)
    }

    fn current(&self) -> Option<&SearchRequest> {
        match &self.state {
            PageState::Idle => None,
            PageState::Searching { request, .. } | PageState::Viewing { request } => Some(request),
        }
    }

    /// Forget the current query.
    pub fn reset(&mut self) {
        self.state = PageState::Idle;
    }

    /// Begin a fresh query on `request.page`, dropping any previous one.
    pub fn start(&mut self, request: SearchRequest) -> SearchRequest {
        self.state = PageState::Searching {
            request: request.clone(),
            fresh: true,
        };
        request
    }

    pub fn next_page(&mut self) -> Result<SearchRequest> {
        self.step(|page| page.saturating_add(1))
    }

    /// Never goes below page 1.
    pub fn previous_page(&mut self) -> Result<SearchRequest> {
        self.step(|page| page.saturating_sub(1).max(1))
    }

    fn step(&mut self, turn: impl Fn(u32) -> u32) -> Result<SearchRequest> {
        let request = self.current().ok_or(InputError::NoActiveSearch)?;
        let request = request.clone().with_page(turn(request.page));
        self.state = PageState::Searching {
            request: request.clone(),
            fresh: false,
        };
        Ok(request)
    }

    /// Settle the in-flight request. A failed fresh search forgets the query;
    /// a failed navigation keeps it on the page that was attempted.
    pub fn finish(&mut self, succeeded: bool) {
        let state = std::mem::replace(&mut self.state, PageState::Idle);
        self.state = match state {
            PageState::Searching { fresh: true, .. } if !succeeded => PageState::Idle,
            PageState::Searching { request, .. } => PageState::Viewing { request },
            other => other,
        };
    }
}
