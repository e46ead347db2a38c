//! `kin completions`: shell completion scripts.
//!
//! The script is generated from the live clap definition, so every
//! subcommand and flag above is covered. It does not read any input tables.

use std::io::{self, Write};

use clap::Args;
use clap_complete::{Shell, generate};

/// Name the scripts complete for.
const BIN_NAME: &str = "kin";

/// Arguments for `kin completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to emit a script for.
    #[arg(value_enum)]
    pub shell: Shell,
}

fn write_completions(shell: Shell, command: &mut clap::Command, w: &mut dyn Write) -> io::Result<()> {
    generate(shell, command, BIN_NAME, w);
    w.flush()
}

/// Execute `kin completions`.
///
/// # Errors
///
/// Fails if stdout is closed.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_completions(shell, command, &mut out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_command() -> clap::Command {
        clap::Command::new(BIN_NAME)
            .subcommand(clap::Command::new("stats"))
            .subcommand(clap::Command::new("cliques"))
    }

    #[test]
    fn bash_script_names_subcommands() {
        let mut buf = Vec::new();
        write_completions(Shell::Bash, &mut sample_command(), &mut buf).unwrap();
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("kin"));
        assert!(script.contains("cliques"));
    }

    #[test]
    fn every_shell_produces_output() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            let mut buf = Vec::new();
            write_completions(shell, &mut sample_command(), &mut buf).unwrap();
            assert!(!buf.is_empty(), "{shell} script is empty");
        }
    }
}
