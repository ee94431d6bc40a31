use crate::error::{InputError, Result};

/// Results per page. Kept small so a page fits on one console screen.
pub const PER_PAGE: u32 = 5;

/// One logical query against the repository search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    pub qualifiers: Vec<String>,
    pub page: u32,
    pub per_page: u32,
}

impl SearchRequest {
    /// Trims the term and qualifiers, dropping blank qualifiers. Fails on a blank term.
    pub fn new(term: &str, qualifiers: &[String]) -> Result<Self> {
        let term = term.trim();
        if term.is_empty() {
            return Err(InputError::EmptyTerm.into());
        }

        Ok(SearchRequest {
            term: term.to_string(),
            qualifiers: qualifiers
                .iter()
                .map(|q| q.trim())
                .filter(|q| !q.is_empty())
                .map(str::to_string)
                .collect(),
            page: 1,
            per_page: PER_PAGE,
        })
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn url(&self, api_base: &str) -> String {
        build_url(api_base, &self.term, &self.qualifiers, self.page, self.per_page)
    }
}

/// Builds the `q` parameter: the term's words and every qualifier are
/// percent-encoded one by one and joined with literal `+`.
pub fn build_query(term: &str, qualifiers: &[String]) -> String {
    let words: Vec<&str> = term.split_whitespace().collect();
    let mut query = urlencoding::encode(&words.join("+")).into_owned();

    for qualifier in qualifiers.iter().map(|q| q.trim()) {
        if qualifier.is_empty() {
            continue;
        }
        if !query.is_empty() {
            query.push('+');
        }
        query.push_str(&urlencoding::encode(qualifier));
    }

    query
}

/// Full request URL. Page 1 is GitHub's default, so `page` is only sent above it.
pub fn build_url(
    api_base: &str,
    term: &str,
    qualifiers: &[String],
    page: u32,
    per_page: u32,
) -> String {
    let mut url = format!(
        "{}/search/repositories?q={}&per_page={}",
        api_base.trim_end_matches('/'),
        build_query(term, qualifiers),
        per_page
    );

    if page > 1 {
        url.push_str(&format!("&page={}", page));
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.github.com";

    fn quals(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn multi_word_term_with_qualifier() {
        let url = build_url(BASE, "cpp web server", &quals(&["stars:>500"]), 1, PER_PAGE);
        assert!(url.contains("q=cpp%2Bweb%2Bserver+stars%3A%3E500"), "{url}");
        assert!(!url.contains("&page="));
        assert!(url.ends_with("&per_page=5"));
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let query = build_query("x", &quals(&["path:src/lib", "created:>2020-01-01", "topic:game engine"]));
        let qualifier_part = query.strip_prefix("x+").unwrap();
        for c in [':', '>', '/', ' '] {
            assert!(!qualifier_part.contains(c), "{c:?} leaked into {query}");
        }
        assert_eq!(
            qualifier_part,
            "path%3Asrc%2Flib+created%3A%3E2020-01-01+topic%3Agame%20engine"
        );
    }

    #[test]
    fn page_parameter_only_above_one() {
        let first = build_url(BASE, "rust", &[], 1, PER_PAGE);
        assert!(!first.contains("&page="));

        let third = build_url(BASE, "rust", &[], 3, PER_PAGE);
        assert!(third.ends_with("&page=3"));
        assert_eq!(third.matches("&page=").count(), 1);
    }

    #[test]
    fn empty_term_has_no_leading_plus() {
        assert_eq!(build_query("", &quals(&["language:rust"])), "language%3Arust");
        assert_eq!(build_query("   ", &quals(&["", "  ", "stars:>1"])), "stars%3A%3E1");
    }

    #[test]
    fn unreserved_characters_pass_through() {
        assert_eq!(build_query("a-b_c.d~e", &[]), "a-b_c.d~e");
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let url = build_url("http://127.0.0.1:1234/", "x", &[], 1, 5);
        assert_eq!(url, "http://127.0.0.1:1234/search/repositories?q=x&per_page=5");
    }

    #[test]
    fn request_rejects_blank_term() {
        let err = SearchRequest::new("  \t", &[]).unwrap_err();
        assert!(matches!(err, crate::error::Error::Input(InputError::EmptyTerm)));
    }

    #[test]
    fn request_drops_blank_qualifiers() {
        let req = SearchRequest::new(" tokio ", &quals(&[" stars:>10 ", "", "  "])).unwrap();
        assert_eq!(req.term, "tokio");
        assert_eq!(req.qualifiers, vec!["stars:>10".to_string()]);
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, PER_PAGE);
        assert_eq!(req.clone().with_page(0).page, 1);
    }
}
