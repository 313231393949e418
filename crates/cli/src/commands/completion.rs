//! Shell completion command implementation

use crate::error::{CliError, CliResult};
use crate::get_cli_command;
use clap_complete::{generate, Shell};
use std::io;

const SUPPORTED_SHELLS: &str = "bash, zsh, fish, powershell, elvish";

pub struct Options {
    pub shell: String,
}

fn parse_shell(name: &str) -> CliResult<Shell> {
    if name.is_empty() {
        return Err(CliError::Message(format!(
            "Shell name is required. Supported shells: {SUPPORTED_SHELLS}"
        )));
    }

    match name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        "powershell" => Ok(Shell::PowerShell),
        "elvish" => Ok(Shell::Elvish),
        _ => Err(CliError::Message(format!(
            "Unsupported shell: {name}. Supported shells: {SUPPORTED_SHELLS}"
        ))),
    }
}

/// Print a completion script for the requested shell to stdout.
pub fn run(options: &Options) -> i32 {
    match parse_shell(&options.shell) {
        Ok(shell) => {
            let mut cmd = get_cli_command();
            generate(shell, &mut cmd, "hogtyped", &mut io::stdout());
            0
        }
        Err(e) => {
            eprintln!("✗ Completion generation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}
