use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no build pipeline command configured")]
    NoPipeline,

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("build pipeline I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode build options: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{}", failure_message(.code, .stderr))]
    Failed { code: Option<i32>, stderr: String },
}

fn failure_message(code: &Option<i32>, stderr: &str) -> String {
    let detail = stderr.trim();
    match (code, detail.is_empty()) {
        (Some(code), true) => format!("build failed with exit code {code}"),
        (Some(code), false) => format!("build failed with exit code {code}: {detail}"),
        (None, true) => "build terminated by signal".to_string(),
        (None, false) => format!("build terminated by signal: {detail}"),
    }
}
