//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Name of the installed binary.
const BIN_NAME: &str = "lodge";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            print_install_hint(self.shell);
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

fn print_install_hint(shell: Shell) {
    eprintln!("# Generating {shell} completion script");
    match shell {
        Shell::Bash => {
            eprintln!("#   lodge completions bash > ~/.local/share/bash-completion/completions/lodge");
            eprintln!("# Or add to ~/.bashrc:");
            eprintln!("#   eval \"$(lodge completions bash)\"");
        }
        Shell::Zsh => {
            eprintln!("#   lodge completions zsh > ~/.zsh/completions/_lodge");
            eprintln!("# Make sure ~/.zsh/completions is in your $fpath");
        }
        Shell::Fish => {
            eprintln!("#   lodge completions fish > ~/.config/fish/completions/lodge.fish");
        }
        Shell::PowerShell => {
            eprintln!("#   lodge completions powershell | Out-String | Invoke-Expression");
        }
        _ => {}
    }
    eprintln!();
}
