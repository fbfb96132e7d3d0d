use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use toolrun::descriptor::TaskDescriptor;
use toolrun::runner::TaskRunner;
use toolrun::storage::ScopedSessionFactory;
use toolrun::tool::AddTool;

/// One tool invocation: task descriptor file in, result descriptor file out.
///
/// A result file is always written once the descriptor parses; failures
/// after that point are encoded in the result's `status` and `error`
/// fields, not in the exit code.
#[derive(Parser)]
#[command(name = "toolrun", version, about = "Containerized tool execution harness")]
struct Cli {
    /// Path to the task descriptor JSON produced by the platform
    input: PathBuf,

    /// Path to write the result descriptor JSON to
    output: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Everything up to a parsed descriptor is an invocation error: there is
    // nothing to write a result against, so report and exit non-zero.
    let raw = match std::fs::read_to_string(&cli.input) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Error reading task descriptor {}: {e}", cli.input.display());
            std::process::exit(1);
        }
    };
    let descriptor: TaskDescriptor = match serde_json::from_str(&raw) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            eprintln!("Error parsing task descriptor {}: {e}", cli.input.display());
            std::process::exit(1);
        }
    };

    let runner = TaskRunner::new(Arc::new(ScopedSessionFactory::new()), Box::new(AddTool));
    let result = runner.run(descriptor).await;

    let rendered = match serde_json::to_string_pretty(&result) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error serializing result descriptor: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = std::fs::write(&cli.output, rendered) {
        eprintln!(
            "Error writing result descriptor {}: {e}",
            cli.output.display()
        );
        std::process::exit(1);
    }
}
