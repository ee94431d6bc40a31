use crate::error::{Error, Result};
use crate::types::{RepositoryRecord, SearchPage, NOT_AVAILABLE, NO_LICENSE, UNKNOWN_LICENSE};
use serde_json::Value;
use tracing::{debug, warn};

/// Characters of a raw body kept in diagnostics.
pub const EXCERPT_LEN: usize = 500;

/// Parse a repository search payload. Only invalid JSON (or JSON that isn't
/// an object) is an error; missing fields fall back to their defaults.
pub fn parse(body: &str) -> Result<SearchPage> {
    let json: Value = serde_json::from_str(body).map_err(|e| Error::MalformedResponse {
        reason: e.to_string(),
        excerpt: excerpt(body),
    })?;

    if !json.is_object() {
        return Err(Error::MalformedResponse {
            reason: "expected a JSON object at the top level".to_string(),
            excerpt: excerpt(body),
        });
    }

    let total_count = json.get("total_count").and_then(Value::as_u64);

    let Some(items) = json.get("items").and_then(Value::as_array) else {
        let diagnostic = match json.get("message").and_then(Value::as_str) {
            Some(message) => format!("GitHub API message: {}", message),
            None => "response does not contain an 'items' array".to_string(),
        };
        warn!("{}", diagnostic);
        return Ok(SearchPage {
            records: Vec::new(),
            total_count,
            diagnostic: Some(diagnostic),
        });
    };

    let records: Vec<RepositoryRecord> = items.iter().map(map_item).collect();
    debug!(count = records.len(), ?total_count, "parsed search items");

    Ok(SearchPage {
        records,
        total_count,
        diagnostic: None,
    })
}

fn map_item(item: &Value) -> RepositoryRecord {
    let text = |key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .unwrap_or(NOT_AVAILABLE)
            .to_string()
    };

    RepositoryRecord {
        full_name: text("full_name"),
        html_url: text("html_url"),
        description: text("description"),
        pushed_at: text("pushed_at"),
        stargazers_count: item
            .get("stargazers_count")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        license: license(item),
    }
}

fn license(item: &Value) -> String {
    match item.get("license").and_then(|l| l.get("spdx_id")) {
        Some(Value::String(id)) if id == "NOASSERTION" => NO_LICENSE.to_string(),
        Some(Value::String(id)) => id.clone(),
        None | Some(Value::Null) => UNKNOWN_LICENSE.to_string(),
        Some(other) => other.to_string(),
    }
}

/// `message` and `documentation_url` from an error body, when it is JSON.
pub fn service_message(body: &str) -> (Option<String>, Option<String>) {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return (None, None);
    };
    let field = |key: &str| json.get(key).and_then(Value::as_str).map(str::to_string);
    (field("message"), field("documentation_url"))
}

/// First `EXCERPT_LEN` characters of `body`, marked when cut.
pub fn excerpt(body: &str) -> String {
    match body.char_indices().nth(EXCERPT_LEN) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
