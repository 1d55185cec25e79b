use clap::{Parser, Subcommand};
use std::fs;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use workflow_compiler::config::CompileOptions;
use workflow_compiler::error::CompilerError;
use workflow_compiler::parse::types::GraphSnapshot;

/// Validate and compile workflow graph snapshots outside the editor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report structural and per-node problems
    Validate {
        /// Path to the snapshot JSON file
        snapshot_path: String,
    },
    /// Compile to a DAG plus per-node configs
    Compile {
        /// Path to the snapshot JSON file
        snapshot_path: String,
        /// Optional compile options JSON file
        #[arg(short, long)]
        options: Option<String>,
    },
    /// List recognized source -> (filter?) -> sink chains
    Sequences {
        /// Path to the snapshot JSON file
        snapshot_path: String,
    },
    /// Show the upstream fields available to one node
    Inputs {
        /// Path to the snapshot JSON file
        snapshot_path: String,
        /// Node to inspect
        node_id: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("workflow_compiler=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Validate { snapshot_path } => {
            let snapshot = load_snapshot(&snapshot_path);
            let report = workflow_compiler::validate::validate(&snapshot);
            print_json(&report);
            if report.is_valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Command::Compile {
            snapshot_path,
            options,
        } => {
            let snapshot = load_snapshot(&snapshot_path);
            let options = match options {
                Some(path) => CompileOptions::from_json(&read_file(&path))
                    .unwrap_or_else(|e| exit_with_errors(&[e])),
                None => CompileOptions::default(),
            };
            match workflow_compiler::lower::compile(&snapshot, &options) {
                Ok(compiled) => {
                    print_json(&compiled);
                    ExitCode::SUCCESS
                }
                Err(errors) => exit_with_errors(&errors),
            }
        }
        Command::Sequences { snapshot_path } => {
            let snapshot = load_snapshot(&snapshot_path);
            print_json(&workflow_compiler::lower::find_file_conversion_sequences(&snapshot));
            ExitCode::SUCCESS
        }
        Command::Inputs {
            snapshot_path,
            node_id,
        } => {
            let snapshot = load_snapshot(&snapshot_path);
            print_json(&workflow_compiler::schema::available_inputs(&snapshot, &node_id));
            ExitCode::SUCCESS
        }
    }
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)))
}

fn load_snapshot(path: &str) -> GraphSnapshot {
    workflow_compiler::parse::parse(&read_file(path)).unwrap_or_else(|errors| exit_with_errors(&errors))
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&format!("Failed to serialize output: {}", e)),
    }
}

fn exit_with_errors(errors: &[CompilerError]) -> ! {
    for error in errors {
        eprintln!("{}", error);
    }
    std::process::exit(1);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
