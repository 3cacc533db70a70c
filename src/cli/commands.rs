use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Binding extraction and descriptor generation for serverless function hosts
#[derive(Parser, Debug)]
#[command(
    name = "funcgen",
    about = "Generates serverless host descriptors from annotated service declarations",
    version,
    long_about = "funcgen consumes a front-end model of annotated service and function \
                  declarations and normalizes every trigger, input, and output binding \
                  into the host's descriptor format, writing one function.json per \
                  exposed function plus the host metadata."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug output")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate host descriptor artifacts from a front-end model",
        long_about = "Reads a front-end model JSON, resolves every binding, and writes the \
                      artifact tree (host.json plus one function.json per function).\n\n\
                      Examples:\n  \
                      funcgen generate model.json\n  \
                      funcgen generate model.json --out-dir target/azure_functions\n  \
                      funcgen generate model.json --native --entry-point app"
    )]
    Generate(GenerateArgs),

    #[command(
        about = "Resolve bindings without writing artifacts",
        long_about = "Runs the extraction pass and prints the resolved descriptors to stdout. \
                      Useful for validating annotations before a build.\n\n\
                      Examples:\n  \
                      funcgen check model.json\n  \
                      funcgen check model.json --format json"
    )]
    Check(CheckArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(value_name = "MODEL", help = "Path to the front-end model JSON")]
    pub model: PathBuf,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        default_value = "azure_functions",
        help = "Output directory for the artifact tree"
    )]
    pub out_dir: PathBuf,

    #[arg(long, help = "Package as a native executable instead of a managed runtime")]
    pub native: bool,

    #[arg(
        long,
        value_name = "FILE",
        default_value = "app.jar",
        help = "Compiled entry point referenced from host.json"
    )]
    pub entry_point: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    #[arg(value_name = "MODEL", help = "Path to the front-end model JSON")]
    pub model: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}
