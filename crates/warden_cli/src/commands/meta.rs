//! Meta commands: shell completions.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::Cli;

/// Print a completion script for the given shell to stdout.
pub(crate) fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
