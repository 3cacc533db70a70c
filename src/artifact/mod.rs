//! Descriptor artifact generation
//!
//! Consumes the full set of extracted `FunctionContext`s and writes the host
//! descriptors: `host.json` with the entry-point reference, plus one
//! `<function>/function.json` holding that function's ordered binding array.
//! Any I/O failure is fatal for the whole pass; the output directory may be
//! left partially populated and cleanup is the caller's responsibility.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::extract::FunctionContext;

pub mod reporter;

pub use reporter::{CollectingReporter, ConsoleReporter, NullReporter, Reporter};

/// Fixed artifact root referenced by the deployment command templates.
pub const ARTIFACT_ROOT: &str = "azure_functions";

const EXTENSION_BUNDLE_ID: &str = "Microsoft.Azure.Functions.ExtensionBundle";
const EXTENSION_BUNDLE_VERSION: &str = "[4.*, 5.0.0)";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to write artifact '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize artifact '{}'", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HostDescriptor<'a> {
    version: &'static str,
    extension_bundle: ExtensionBundle,
    custom_handler: CustomHandler<'a>,
}

#[derive(Serialize)]
struct ExtensionBundle {
    id: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomHandler<'a> {
    description: HandlerDescription<'a>,
    enable_forwarding_http_request: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HandlerDescription<'a> {
    default_executable_path: &'a str,
    arguments: Vec<&'a str>,
}

/// Serializes all extracted functions into the host's artifact layout.
pub struct FunctionsArtifact {
    functions: Vec<FunctionContext>,
    entry_point: String,
    native: bool,
}

impl FunctionsArtifact {
    pub fn new(functions: Vec<FunctionContext>, entry_point: impl Into<String>, native: bool) -> Self {
        Self {
            functions,
            entry_point: entry_point.into(),
            native,
        }
    }

    pub fn functions(&self) -> &[FunctionContext] {
        &self.functions
    }

    /// Writes the artifact tree under `out_dir` and reports progress and the
    /// deployment command templates through `reporter`.
    pub fn generate(&self, out_dir: &Path, reporter: &dyn Reporter) -> Result<(), ArtifactError> {
        fs::create_dir_all(out_dir).map_err(|source| ArtifactError::Write {
            path: out_dir.to_path_buf(),
            source,
        })?;

        self.write_json(&out_dir.join("host.json"), &self.host_descriptor())?;

        for context in &self.functions {
            let function_dir = out_dir.join(context.function_name());
            fs::create_dir_all(&function_dir).map_err(|source| ArtifactError::Write {
                path: function_dir.clone(),
                source,
            })?;
            self.write_json(&function_dir.join("function.json"), context)?;
            debug!(function = context.function_name(), "wrote function descriptor");
        }

        let names: Vec<&str> = self
            .functions
            .iter()
            .map(FunctionContext::function_name)
            .collect();
        info!(count = names.len(), "generated function artifacts");

        reporter.report(&format!("\t@functions:Function: {}", names.join(", ")));
        reporter.report("\n\tExecute the below command to run the functions locally:");
        reporter.report(&format!("\tfunc start --script-root {}", ARTIFACT_ROOT));
        reporter.report("\n\tExecute the below command to publish the functions:");
        reporter.report(&format!(
            "\tfunc azure functionapp publish <function_app_name> --script-root {}",
            ARTIFACT_ROOT
        ));
        Ok(())
    }

    /// Host metadata referencing the compiled entry point. Packaging mode
    /// affects only this reference, never binding content.
    fn host_descriptor(&self) -> HostDescriptor<'_> {
        let description = if self.native {
            HandlerDescription {
                default_executable_path: &self.entry_point,
                arguments: vec![],
            }
        } else {
            HandlerDescription {
                default_executable_path: "java",
                arguments: vec!["-jar", &self.entry_point],
            }
        };
        HostDescriptor {
            version: "2.0",
            extension_bundle: ExtensionBundle {
                id: EXTENSION_BUNDLE_ID,
                version: EXTENSION_BUNDLE_VERSION,
            },
            custom_handler: CustomHandler {
                description,
                enable_forwarding_http_request: true,
            },
        }
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), ArtifactError> {
        let body = serde_json::to_string_pretty(value).map_err(|source| ArtifactError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, body).map_err(|source| ArtifactError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ServiceExtractor;
    use crate::syntax::{CompilationUnit, FunctionDecl, ServiceDecl};
    use tempfile::TempDir;

    fn hello_contexts() -> Vec<FunctionContext> {
        let unit = CompilationUnit {
            services: vec![
                ServiceDecl::new("/api").with_function(FunctionDecl::new("get").with_name("hello")),
            ],
        };
        ServiceExtractor::new().extract(&unit).unwrap()
    }

    #[test]
    fn test_generate_writes_function_descriptor() {
        let dir = TempDir::new().unwrap();
        let artifact = FunctionsArtifact::new(hello_contexts(), "app.jar", false);
        artifact.generate(dir.path(), &NullReporter).unwrap();

        let descriptor = fs::read_to_string(dir.path().join("hello/function.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&descriptor).unwrap();
        let bindings = parsed["bindings"].as_array().unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0]["type"], "httpTrigger");
        assert_eq!(bindings[1]["name"], "$return");
    }

    #[test]
    fn test_host_descriptor_native_vs_managed() {
        let native = FunctionsArtifact::new(vec![], "app", true);
        let host = serde_json::to_value(native.host_descriptor()).unwrap();
        assert_eq!(host["customHandler"]["description"]["defaultExecutablePath"], "app");
        assert_eq!(
            host["customHandler"]["description"]["arguments"],
            serde_json::json!([])
        );

        let managed = FunctionsArtifact::new(vec![], "app.jar", false);
        let host = serde_json::to_value(managed.host_descriptor()).unwrap();
        assert_eq!(host["customHandler"]["description"]["defaultExecutablePath"], "java");
        assert_eq!(
            host["customHandler"]["description"]["arguments"],
            serde_json::json!(["-jar", "app.jar"])
        );
    }

    #[test]
    fn test_progress_report_lists_function_names() {
        let dir = TempDir::new().unwrap();
        let reporter = CollectingReporter::new();
        let artifact = FunctionsArtifact::new(hello_contexts(), "app.jar", false);
        artifact.generate(dir.path(), &reporter).unwrap();

        let lines = reporter.lines();
        assert!(lines[0].contains("hello"));
        assert!(lines.iter().any(|l| l.contains("func start --script-root azure_functions")));
        assert!(lines
            .iter()
            .any(|l| l.contains("func azure functionapp publish")));
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        // A file where the output directory should be forces the failure.
        let blocked = dir.path().join("out");
        fs::write(&blocked, "not a directory").unwrap();

        let artifact = FunctionsArtifact::new(hello_contexts(), "app.jar", false);
        let err = artifact.generate(&blocked, &NullReporter).unwrap_err();
        assert!(matches!(err, ArtifactError::Write { .. }));
    }
}
