use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

pub fn generate_completions(shell: Shell) {
    let mut cmd = crate::Cli::command();
    generate(shell, &mut cmd, "gitsearch", &mut io::stdout());

    eprintln!();
    eprintln!("Save the output to the appropriate location for your shell:");
    match shell {
        Shell::Bash => {
            eprintln!("  gitsearch completions bash > ~/.local/share/bash-completion/completions/gitsearch");
        }
        Shell::Zsh => {
            eprintln!("  gitsearch completions zsh > ~/.zsh/completions/_gitsearch");
            eprintln!("  # (Add 'fpath=(~/.zsh/completions $fpath)' before 'compinit' in .zshrc)");
        }
        Shell::Fish => {
            eprintln!("  gitsearch completions fish > ~/.config/fish/completions/gitsearch.fish");
        }
        _ => {}
    }
}
