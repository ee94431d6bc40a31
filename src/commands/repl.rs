use super::download::download_command;
use super::search::{print_outcome, report_error, separator};
use crate::session::{SearchOutcome, Session};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Search,
    /// `download` with the result number when it was typed inline.
    Download(Option<String>),
    AuthToken,
    NextPage,
    PreviousPage,
    Help,
    Exit,
    Empty,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, Some(rest.trim().to_string()).filter(|r| !r.is_empty())),
            None => (line, None),
        };

        match word {
            "" => ReplCommand::Empty,
            "search" | "s" => ReplCommand::Search,
            "download" | "d" => ReplCommand::Download(rest),
            "at" => ReplCommand::AuthToken,
            "np" => ReplCommand::NextPage,
            "pp" => ReplCommand::PreviousPage,
            "help" | "h" | "?" => ReplCommand::Help,
            "exit" | "quit" | "q" => ReplCommand::Exit,
            _ => ReplCommand::Unknown(line.to_string()),
        }
    }
}

fn print_options() {
    println!("\n--- Options: \"search\", \"download [#]\", \"np\" (next page), \"pp\" (previous page) ---");
    println!("--- \"at\" (auth token), \"help\", \"exit\" ---");
}

/// Interactive loop over `input`. Returns when the user exits or input ends.
pub struct Repl<R> {
    input: R,
    session: Session,
}

impl<R: BufRead> Repl<R> {
    pub fn new(input: R, session: Session) -> Self {
        Repl { input, session }
    }

    pub fn run(mut self) -> io::Result<()> {
        println!("\n{}", separator());
        println!("GitHub Repository Search");
        println!("{}", separator());
        if self.session.has_token() {
            println!("GitHub API token loaded from environment.");
        } else {
            println!("No GitHub API token found. You can set one with the 'at' command.");
        }
        print_options();

        loop {
            let label = self.command_prompt();
            let Some(line) = self.prompt(&label)? else {
                break;
            };

            match ReplCommand::parse(&line) {
                ReplCommand::Search => self.search()?,
                ReplCommand::Download(index) => self.download(index)?,
                ReplCommand::AuthToken => self.auth_token()?,
                ReplCommand::NextPage => {
                    let outcome = self.session.next_page();
                    self.show(outcome, true);
                }
                ReplCommand::PreviousPage => {
                    let outcome = self.session.previous_page();
                    self.show(outcome, true);
                }
                ReplCommand::Help => print_options(),
                ReplCommand::Exit => break,
                ReplCommand::Empty => continue,
                ReplCommand::Unknown(cmd) => {
                    println!("Unknown command: {}", cmd);
                    print_options();
                }
            }
        }

        println!("\nThank you for using gitsearch!");
        Ok(())
    }

    /// Shows the page on screen once a search is active.
    fn command_prompt(&self) -> String {
        match self.session.current_page() {
            Some(page) => format!(" PG: ({}) > ", page),
            None => " > ".to_string(),
        }
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        print!("{}", message);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Term (re-prompted until non-empty) and qualifiers until a blank line.
    fn read_search_input(&mut self) -> io::Result<Option<(String, Vec<String>)>> {
        println!("\n--- Search Configuration ---");
        let term = loop {
            match self.prompt("Search term (e.g., 'cpp web server'): ")? {
                None => return Ok(None),
                Some(term) if term.is_empty() => println!("Input cannot be empty. Please try again."),
                Some(term) => break term,
            }
        };

        println!("\nEnter qualifiers one by one (e.g., 'language:C++', 'stars:>500', 'topic:game-engine').");
        let mut qualifiers = Vec::new();
        loop {
            let message = format!("Qualifier [{}] (or press Enter to finish): ", qualifiers.len() + 1);
            match self.prompt(&message)? {
                Some(q) if !q.is_empty() => {
                    println!("  Added qualifier: \"{}\"", q);
                    qualifiers.push(q);
                }
                _ => break,
            }
        }
        if qualifiers.is_empty() {
            println!("No qualifiers added.");
        }

        Ok(Some((term, qualifiers)))
    }

    fn search(&mut self) -> io::Result<()> {
        let Some((term, qualifiers)) = self.read_search_input()? else {
            return Ok(());
        };

        println!("\nSearching GitHub for repositories matching: \"{}\"", term);
        for q in &qualifiers {
            println!("  - {}", q);
        }
        println!("Please wait, this may take a moment...");

        let outcome = self.session.search(&term, &qualifiers);
        self.show(outcome, false);
        Ok(())
    }

    fn show(&self, outcome: crate::error::Result<SearchOutcome>, navigated: bool) {
        println!("\n--- Search Results ---");
        match outcome {
            Ok(outcome) => print_outcome(&outcome, self.session.results(), navigated),
            Err(e) => report_error(&e),
        }
    }

    fn download(&mut self, index: Option<String>) -> io::Result<()> {
        if self.session.results().is_empty() {
            println!("Please search something first...");
            return Ok(());
        }
        let index = match index {
            Some(index) => index,
            None => match self.prompt(" > Project #: ")? {
                Some(index) => index,
                None => return Ok(()),
            },
        };
        download_command(&self.session, &index);
        Ok(())
    }

    fn auth_token(&mut self) -> io::Result<()> {
        println!("\n--- Please input your Authorization Token ---");
        let Some(token) = self.prompt("Enter GitHub API token: ")? else {
            return Ok(());
        };

        if let Err(e) = self.session.set_token(&token) {
            eprintln!("Warning: Could not write the token to the env file: {}", e);
        } else {
            println!("Token saved.");
        }
        if self.session.has_token() {
            println!("Authorization token set successfully.");
        } else {
            eprintln!("Warning: Authorization token is empty. This may limit API access.");
        }
        Ok(())
    }
}
