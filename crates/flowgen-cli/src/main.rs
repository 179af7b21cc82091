//! flowgen - synthetic branches and commits for gitflow guideline demos.

use clap::Parser;

mod commands;
mod logging;
mod output;
mod services;

use commands::{Cli, Commands};
use services::Flow;

fn main() {
    let cli = Cli::parse();
    output::set_quiet(cli.quiet);
    logging::init(cli.verbose);

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Good(args) => commands::run::run(Flow::Good, args, config),
        Commands::Bad(args) => commands::run::run(Flow::Bad, args, config),
        Commands::Preview {
            pattern,
            count,
            seed,
            json,
        } => commands::preview::run(*pattern, *count, *seed, *json, config),
        Commands::Completions { shell } => commands::completions::run(*shell),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
