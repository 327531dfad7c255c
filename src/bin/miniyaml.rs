//! Command-line interface for miniyaml
//! This binary parses miniyaml configuration documents and prints them in a
//! chosen output format, or just validates them.
//!
//! Usage:
//!   miniyaml parse `<path>` [--format `<format>`]  - Parse and print the block tree
//!   miniyaml check `<path>`                      - Parse, reporting only errors

use clap::{Arg, Command};
use miniyaml::miniyaml::{parse, Block};

fn main() {
    let matches = Command::new("miniyaml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for checking and converting miniyaml configuration files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse a document and print its block tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the document")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'render', 'json')")
                        .default_value("render"),
                ),
        )
        .subcommand(
            Command::new("check").about("Parse a document, reporting only errors").arg(
                Arg::new("path")
                    .help("Path to the document")
                    .required(true)
                    .index(1),
            ),
        )
        .get_matches();

    // Handle subcommands
    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let path = parse_matches.get_one::<String>("path").unwrap();
            let format = parse_matches.get_one::<String>("format").unwrap();
            handle_parse_command(path, format);
        }
        Some(("check", check_matches)) => {
            let path = check_matches.get_one::<String>("path").unwrap();
            handle_check_command(path);
        }
        _ => unreachable!(),
    }
}

/// Read and parse a document, exiting with a diagnostic on failure.
fn load_document(path: &str) -> Block {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });

    parse(&source).unwrap_or_else(|e| {
        eprintln!("Parse error: {}", e);
        std::process::exit(1);
    })
}

/// Handle the parse command
fn handle_parse_command(path: &str, format: &str) {
    let doc = load_document(path);
    match format {
        "render" => println!("{}", doc),
        "json" => {
            let output = serde_json::to_string_pretty(&doc).unwrap_or_else(|e| {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            });
            println!("{}", output);
        }
        other => {
            eprintln!("Unknown format: {}", other);
            std::process::exit(1);
        }
    }
}

/// Handle the check command
fn handle_check_command(path: &str) {
    load_document(path);
}
