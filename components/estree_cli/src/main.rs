//! ESTree CLI
//!
//! Entry point for the `estree` binary. Parses CLI arguments, reads the
//! source from a file or piped stdin and prints the ESTree JSON.

use clap::Parser as ClapParser;
use estree_cli::{Cli, CliResult, Runner};

fn run(cli: &Cli) -> CliResult<String> {
    let runner = Runner::new(cli.parse_options()?).with_serialize_options(cli.serialize_options());
    match &cli.file {
        Some(path) => runner.run_file(path),
        None => runner.run_stdin(),
    }
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("{}", e.render(cli.error_format));
            std::process::exit(1);
        }
    }
}
