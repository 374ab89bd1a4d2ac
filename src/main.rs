use clap::Parser;
use costume::cli::{Cli, Commands};
use costume::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::auto();

    match cli.command {
        Commands::Scan(args) => costume::cli::scan::run(args, &printer)?,
        Commands::Seed(args) => costume::cli::seed::run(args, &printer)?,
        Commands::Apply(args) => costume::cli::apply::run(args, &printer)?,
        Commands::Export(args) => costume::cli::export::run(args, &printer)?,
        Commands::Validate(args) => costume::cli::validate::run(args, &printer)?,
        Commands::Completions(args) => costume::cli::completions::run(args)?,
    }

    Ok(())
}
