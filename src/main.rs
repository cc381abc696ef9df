use anyhow::Result;
use clap::Parser;
use maintenance_maker::cli::Cli;
use maintenance_maker::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);
    cli.run()
}
