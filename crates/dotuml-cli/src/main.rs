//! DotUML CLI - Generate Mermaid class diagrams from declared type facts

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is installed once, inside run(), from the parsed flags
    let app = cli::DotumlApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
