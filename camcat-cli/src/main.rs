// camcat-cli/src/main.rs
//
// Entry point of the `camcat` binary: parse arguments, set up logging and
// colors, run one pass and turn the outcome into an exit code.

use camcat_cli::error::exit_code;
use camcat_cli::{Cli, logging, run_concat, terminal};
use camcat_core::CoreError;

use clap::Parser;
use std::io::IsTerminal;
use std::process;

fn main() {
    let cli = Cli::parse();

    let color = std::io::stdout().is_terminal();
    terminal::set_color(color);
    logging::init_logging(cli.verbose, std::io::stderr().is_terminal());

    let result = run_concat(&cli);
    match &result {
        Ok(()) | Err(CoreError::NoFilesFound) => {}
        Err(e) => log::error!("{}", e),
    }
    process::exit(exit_code(&result));
}
