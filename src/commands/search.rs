use crate::error::Error;
use crate::session::{SearchOutcome, Session};
use crate::types::RepositoryRecord;
use chrono::{DateTime, Utc};
use tracing::error;

const DESCRIPTION_WIDTH: usize = 100;

pub fn separator() -> String {
    "=".repeat(60)
}

/// One-shot search. Returns false when the request failed.
pub fn search_repos(session: &mut Session, term: &str, qualifiers: &[String], page: u32, json: bool) -> bool {
    match session.search_at(term, qualifiers, page) {
        Ok(outcome) => {
            if json {
                match serde_json::to_string_pretty(session.results()) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Failed to serialize results: {}", e);
                        return false;
                    }
                }
            } else {
                print_outcome(&outcome, session.results(), false);
            }
            true
        }
        Err(e) => {
            error!(transport = e.is_transport(), status = ?e.status(), "search failed");
            report_error(&e);
            false
        }
    }
}

pub fn print_outcome(outcome: &SearchOutcome, records: &[RepositoryRecord], navigated: bool) {
    if let Some(diagnostic) = &outcome.diagnostic {
        eprintln!("Warning: {}", diagnostic);
    }

    if records.is_empty() {
        if navigated {
            println!("No more results found. You might be at the last page.");
        } else {
            println!("No repositories found matching your criteria.");
        }
        return;
    }

    match outcome.total_count {
        Some(total) => println!(
            "\nFound {} repositories (page {}, {} total):",
            records.len(),
            outcome.page,
            total
        ),
        None => println!("\nFound {} repositories (page {}):", records.len(), outcome.page),
    }
    println!("{}", separator());

    let now = Utc::now();
    for (i, repo) in records.iter().enumerate() {
        println!("Result {} of {}:", i + 1, records.len());
        println!("  {:<15}{}", "Name:", repo.full_name);
        println!("  {:<15}{}", "URL:", repo.html_url);
        println!("  {:<15}{}", "Description:", describe(repo));
        println!("  {:<15}⭐ {}", "Stars:", repo.stargazers_count);
        println!("  {:<15}{}", "Last Push:", last_push(&repo.pushed_at, now));
        println!("  {:<15}{}", "License:", repo.license);
        if i + 1 < records.len() {
            println!("{}", ".".repeat(60));
        }
    }
    println!("{}", separator());
}

fn describe(repo: &RepositoryRecord) -> String {
    if !repo.has_description() {
        return "No description provided.".to_string();
    }
    if repo.description.chars().count() > DESCRIPTION_WIDTH {
        let cut: String = repo.description.chars().take(DESCRIPTION_WIDTH - 3).collect();
        format!("{}...", cut)
    } else {
        repo.description.clone()
    }
}

fn last_push(raw: &str, now: DateTime<Utc>) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(pushed) => {
            let pushed = pushed.with_timezone(&Utc);
            format!("{} ({})", pushed.format("%Y-%m-%d"), age(now - pushed))
        }
        Err(_) => raw.to_string(),
    }
}

fn age(elapsed: chrono::Duration) -> String {
    let days = elapsed.num_days();
    match days {
        i64::MIN..=0 => "today".to_string(),
        1 => "yesterday".to_string(),
        2..=59 => format!("{} days ago", days),
        60..=729 => format!("{} months ago", days / 30),
        _ => format!("{} years ago", days / 365),
    }
}

/// Print a core error with hints matching its class.
pub fn report_error(err: &Error) {
    match err {
        Error::Transport(_) => {
            eprintln!("Network error: {}", err);
            eprintln!("The request didn't reach GitHub. Check your connection, DNS or proxy.");
        }
        Error::Service { status, .. } => {
            eprintln!("{}", err);
            if matches!(status, 401 | 403 | 429) {
                eprintln!("You may be rate-limited or your token was rejected.");
                eprintln!("Set a personal access token with `at` for higher limits.");
            } else if *status == 422 {
                eprintln!("Check your search term and qualifiers.");
            }
        }
        Error::MalformedResponse { excerpt, .. } => {
            eprintln!("{}", err);
            eprintln!("Received: {}", excerpt);
        }
        Error::Clone(_) => eprintln!("Download failed: {}", err),
        Error::Input(_) => eprintln!("Input error: {}", err),
    }
}
