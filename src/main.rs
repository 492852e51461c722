use clap::Parser;
use elitekpi::cli::{Cli, run};
use elitekpi::log::init_logging;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
