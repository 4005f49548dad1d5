//! `millwright-build`: parse build flags and hand them to the build pipeline.

use clap::Parser;

pub mod cli;
pub mod error;
pub mod options;
pub mod pipeline;

pub use cli::Cli;
pub use error::BuildError;
pub use options::{BuildOptions, OptionalArg};
pub use pipeline::{BuildPipeline, ScriptPipeline};

/// What the process prints and how it exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub exit_code: i32,
}

/// Parse the process arguments.
///
/// A usage error becomes an outcome exiting with 1. Help and version output
/// exit with 0.
pub fn parse_cli<I, T>(args: I) -> Result<Cli, Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| Outcome {
        message: e.to_string().trim_end().to_string(),
        exit_code: if e.use_stderr() { 1 } else { 0 },
    })
}

/// Run one build and turn the result into printable output.
///
/// An empty result prints `Success!`.
pub async fn run(options: &BuildOptions, pipeline: &dyn BuildPipeline) -> Outcome {
    match pipeline.build(options).await {
        Ok(result) => {
            tracing::info!("build finished");
            let message = if result.is_empty() {
                "Success!".to_string()
            } else {
                result
            };
            Outcome {
                message,
                exit_code: 0,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "build failed");
            Outcome {
                message: e.to_string(),
                exit_code: 1,
            }
        }
    }
}
