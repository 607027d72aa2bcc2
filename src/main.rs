use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tilestitch::cli::Cli;
use tilestitch::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();
    let cwd = std::env::current_dir().into_diagnostic()?;

    // Per-file and per-declaration failures are reported, not returned
    tilestitch::cli::run(cli, &cwd, &printer)?;

    Ok(())
}
