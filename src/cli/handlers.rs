//! Command handlers
//!
//! Each handler runs one subcommand end to end and maps failures to exit
//! codes. Library errors carry their own context; handlers only add the
//! surrounding file/CLI context.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::error;

use crate::artifact::{ConsoleReporter, FunctionsArtifact, NullReporter, Reporter};
use crate::cli::commands::{CheckArgs, GenerateArgs, OutputFormatArg};
use crate::extract::{FunctionContext, ServiceExtractor};
use crate::syntax::CompilationUnit;

pub fn handle_generate(args: &GenerateArgs, quiet: bool) -> i32 {
    match run_generate(args, quiet) {
        Ok(()) => 0,
        Err(e) => {
            error!("generate failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub fn handle_check(args: &CheckArgs) -> i32 {
    match run_check(args) {
        Ok(()) => 0,
        Err(e) => {
            error!("check failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn run_generate(args: &GenerateArgs, quiet: bool) -> Result<()> {
    let unit = load_model(&args.model)?;
    let contexts = ServiceExtractor::new()
        .extract(&unit)
        .context("binding extraction failed")?;

    let artifact = FunctionsArtifact::new(contexts, &args.entry_point, args.native);
    let reporter: Box<dyn Reporter> = if quiet {
        Box::new(NullReporter)
    } else {
        Box::new(ConsoleReporter)
    };
    artifact
        .generate(&args.out_dir, reporter.as_ref())
        .with_context(|| format!("failed to generate artifacts under '{}'", args.out_dir.display()))?;
    Ok(())
}

fn run_check(args: &CheckArgs) -> Result<()> {
    let unit = load_model(&args.model)?;
    let contexts = ServiceExtractor::new()
        .extract(&unit)
        .context("binding extraction failed")?;

    match args.format {
        OutputFormatArg::Json => {
            let descriptors: serde_json::Map<String, serde_json::Value> = contexts
                .iter()
                .map(|context| {
                    Ok((
                        context.function_name().to_string(),
                        serde_json::to_value(context)?,
                    ))
                })
                .collect::<Result<_, serde_json::Error>>()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::Value::Object(descriptors))?
            );
        }
        OutputFormatArg::Human => {
            for context in &contexts {
                println!("{}", describe(context));
            }
        }
    }
    Ok(())
}

fn describe(context: &FunctionContext) -> String {
    let kinds: Vec<&str> = context
        .bindings()
        .iter()
        .map(|binding| binding.binding_type())
        .collect();
    format!(
        "{}: {} bindings [{}]",
        context.function_name(),
        context.bindings().len(),
        kinds.join(", ")
    )
}

fn load_model(path: &Path) -> Result<CompilationUnit> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("failed to read model '{}'", path.display()))?;
    serde_json::from_str(&body)
        .with_context(|| format!("model '{}' is not a valid front-end model", path.display()))
}
