use super::search::{report_error, separator};
use crate::error::{InputError, Result};
use crate::session::Session;

/// Parse a 1-based result number typed by the user.
pub fn parse_index(input: &str) -> std::result::Result<usize, InputError> {
    let input = input.trim();
    match input.parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(InputError::InvalidIndex(input.to_string())),
    }
}

pub fn download_result(session: &Session, index: &str) -> Result<()> {
    let index = parse_index(index)?;
    let record = session.select(index)?;

    println!("\n{}", separator());
    println!("CLONING: {}", record.html_url);
    println!("{}", separator());

    let report = session.download(index)?;

    println!("✓ Cloned {} to {}", record.full_name, report.path.display());
    if let Some(head) = &report.head {
        println!("  Commit: {:.8}", head);
    }
    if let Some(origin) = &report.origin {
        println!("  Origin: {}", origin);
    }
    Ok(())
}

/// REPL entry point. Errors are printed, never propagated.
pub fn download_command(session: &Session, index: &str) {
    if let Err(e) = download_result(session, index) {
        report_error(&e);
    }
    println!("{}", separator());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_integers() {
        assert_eq!(parse_index(" 3 "), Ok(3));
        assert_eq!(parse_index("1"), Ok(1));
    }

    #[test]
    fn rejects_zero_negative_and_text() {
        for bad in ["0", "-1", "two", ""] {
            assert_eq!(
                parse_index(bad),
                Err(InputError::InvalidIndex(bad.to_string())),
                "{bad}"
            );
        }
    }
}
