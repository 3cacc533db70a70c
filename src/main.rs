use funcgen::cli::commands::{CliArgs, Commands};
use funcgen::cli::handlers::{handle_check, handle_generate};
use funcgen::util::{init_logging, parse_level, LoggingConfig};
use funcgen::VERSION;

use clap::Parser;
use std::env;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("funcgen v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Generate(generate_args) => handle_generate(generate_args, args.quiet),
        Commands::Check(check_args) => handle_check(check_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var("FUNCGEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    };

    init_logging(&LoggingConfig {
        level,
        ..LoggingConfig::default()
    });
}
