//! bigo-engine CLI entry point

use std::fs;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use bigo_engine::report::{format_hierarchy, format_report};
use bigo_engine::{analyze, BigOError, Cli, OutputFormat};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> bigo_engine::Result<String> {
    let cli = Cli::parse_args();

    // 1. Check file exists
    if !cli.file.exists() {
        return Err(BigOError::FileNotFound {
            path: cli.file.display().to_string(),
        });
    }

    // 2. Only Python source is supported
    let ext = cli.file.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !matches!(ext, "py" | "pyi") {
        return Err(BigOError::UnsupportedFile {
            path: cli.file.display().to_string(),
        });
    }

    // 3. Read and analyze
    let source = fs::read_to_string(&cli.file)?;

    if cli.verbose {
        eprintln!("Read {} bytes from {}", source.len(), cli.file.display());
    }

    let result = analyze(&source);

    if cli.verbose {
        eprintln!(
            "Analyzed {} functions, worst class {:?}",
            result.methods.len(),
            result.worst_class()
        );
    }

    // 4. Render in requested format
    let output = match (cli.format, cli.hierarchy) {
        (OutputFormat::Json, _) => serde_json::to_string_pretty(&result)?,
        (OutputFormat::Text, true) => format_hierarchy(&result),
        (OutputFormat::Text, false) => format_report(&result),
    };

    Ok(output)
}
