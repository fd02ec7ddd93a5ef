//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::args::Cli;
use crate::error::TallyError;

/// Generate completions for the given shell.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, TallyError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    generate(shell, &mut cmd, "tally", &mut buf);
    String::from_utf8(buf)
        .map_err(|e| TallyError::Config(format!("Invalid completion output: {e}")))
}
