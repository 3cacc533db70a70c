pub mod commands;
pub mod handlers;

pub use commands::{CheckArgs, CliArgs, Commands, GenerateArgs, OutputFormatArg};
pub use handlers::{handle_check, handle_generate};
