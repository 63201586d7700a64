use clap::{Parser, Subcommand};
use infraflow::prelude::*;
use serde::Serialize;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Turn infrastructure descriptions into specifications, edit them, and lay them out
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the command intent and the component types mentioned in a text
    Detect {
        /// Free text, in English or Korean
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Build a first specification from a text
    Draft {
        #[arg(required = true)]
        text: Vec<String>,

        /// Use `<type>-<n>` ids instead of random ones
        #[arg(long)]
        sequential: bool,
    },
    /// Apply a JSON array of operations to a specification
    Apply {
        /// Path to the specification JSON file
        spec_path: String,
        /// Path to the operations JSON file
        operations_path: String,

        /// Use `<type>-<n>` ids instead of random ones
        #[arg(long)]
        sequential: bool,
    },
    /// Lay out a specification for rendering
    Layout {
        /// Path to the specification JSON file
        spec_path: String,

        /// Optional path to a layout configuration JSON file
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectOutput<'a> {
    command_type: CommandType,
    patterns: Vec<&'a Pattern>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Detect { text } => run_detect(&text.join(" ")),
        Command::Draft { text, sequential } => run_draft(&text.join(" "), sequential),
        Command::Apply {
            spec_path,
            operations_path,
            sequential,
        } => run_apply(&spec_path, &operations_path, sequential),
        Command::Layout { spec_path, config } => run_layout(&spec_path, config.as_deref()),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_detect(text: &str) {
    let detector = PatternDetector::new();
    let output = DetectOutput {
        command_type: detector.detect_command_type(text),
        patterns: detector.detect_all_node_types(text),
    };
    print_json(&output);
}

fn run_draft(text: &str, sequential: bool) {
    let detector = PatternDetector::new();
    let spec = if sequential {
        draft_specification(&detector, text, &mut SequentialIdGenerator::new())
    } else {
        draft_specification(&detector, text, &mut RandomIdGenerator)
    };

    if spec.nodes.is_empty() {
        eprintln!("No known components found in the input text.");
    }
    print_json(&spec);
}

fn run_apply(spec_path: &str, operations_path: &str, sequential: bool) {
    let spec = load_spec(spec_path);
    let operations_json = read_file(operations_path, "operations");
    let operations = Operation::batch_from_json(&operations_json)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let mut engine = if sequential {
        DiffEngine::builder()
            .with_id_generator(SequentialIdGenerator::new())
            .build()
    } else {
        DiffEngine::new()
    };

    let start = Instant::now();
    let result = engine.apply(&spec, &operations);
    tracing::info!(
        applied = result.applied_ops,
        failed = result.errors.len(),
        elapsed = ?start.elapsed(),
        "batch applied"
    );

    for error in &result.errors {
        eprintln!("Skipped {}", error);
    }
    print_json(&result);
}

fn run_layout(spec_path: &str, config_path: Option<&str>) {
    let spec = load_spec(spec_path);
    let config = match config_path {
        Some(path) => LayoutConfig::from_json(&read_file(path, "layout configuration"))
            .unwrap_or_else(|e| exit_with_error(&e.to_string())),
        None => LayoutConfig::default(),
    };

    let dangling = spec.dangling_connections().len();
    if dangling > 0 {
        tracing::warn!(dangling, "specification has connections to missing nodes");
    }

    print_json(&spec_to_flow(&spec, &config));
}

fn load_spec(path: &str) -> Specification {
    let json = read_file(path, "specification");
    Specification::from_json(&json).unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn read_file(path: &str, what: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read {} file '{}': {}", what, path, e))
    })
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&format!("Failed to serialize output: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
