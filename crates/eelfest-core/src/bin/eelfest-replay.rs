#![forbid(unsafe_code)]

//! Replay a recorded page session and print each reaction as a JSON line.
//!
//! Args are parsed by hand to keep the binary lean.

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use eelfest_core::trace::replay;
use eelfest_core::{PageConfig, PageInventory};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
eelfest-replay: re-run a recorded page session against the controller

USAGE:
    eelfest-replay --inventory=PATH [--config=PATH] [TRACE]

ARGS:
    TRACE               JSON-lines trace from traceJsonl() (default: stdin)

OPTIONS:
    --inventory=PATH    PageInventory JSON describing the recorded page
    --config=PATH       PageConfig JSON (default: built-in defaults)
    --help, -h          Show this help message
    --version, -V       Show version

ENVIRONMENT VARIABLES:
    RUST_LOG            Log filter for the JSON log on stderr (default: info)";

#[derive(Default)]
struct Opts {
    inventory: Option<String>,
    config: Option<String>,
    trace: Option<String>,
}

impl Opts {
    fn parse() -> Self {
        let mut opts = Self::default();
        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("eelfest-replay {VERSION}");
                    process::exit(0);
                }
                other => {
                    if let Some(val) = other.strip_prefix("--inventory=") {
                        opts.inventory = Some(val.to_owned());
                    } else if let Some(val) = other.strip_prefix("--config=") {
                        opts.config = Some(val.to_owned());
                    } else if other.starts_with("--") || opts.trace.is_some() {
                        eprintln!("Unknown argument: {other}");
                        eprintln!("Run with --help for usage information.");
                        process::exit(1);
                    } else {
                        opts.trace = Some(other.to_owned());
                    }
                }
            }
        }
        opts
    }
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("Cannot read {path}: {err}");
        process::exit(1);
    })
}

fn main() {
    eelfest_core::logging::init_json_subscriber();
    let opts = Opts::parse();

    let Some(inventory_path) = opts.inventory.as_deref() else {
        eprintln!("Missing --inventory=PATH");
        process::exit(1);
    };
    let inventory: PageInventory = serde_json::from_str(&read_file(inventory_path))
        .unwrap_or_else(|err| {
            eprintln!("Invalid inventory {inventory_path}: {err}");
            process::exit(1);
        });
    let config = match opts.config.as_deref() {
        Some(path) => PageConfig::from_json_str(&read_file(path)).unwrap_or_else(|err| {
            eprintln!("Invalid config {path}: {err}");
            process::exit(1);
        }),
        None => PageConfig::default(),
    };
    let trace = match opts.trace.as_deref() {
        Some(path) => read_file(path),
        None => {
            let mut buf = String::new();
            if let Err(err) = io::stdin().read_to_string(&mut buf) {
                eprintln!("Cannot read stdin: {err}");
                process::exit(1);
            }
            buf
        }
    };

    let reactions = match replay(config, inventory, &trace) {
        Ok((_, reactions)) => reactions,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };
    eelfest_core::info!(reactions = reactions.len(), "replay finished");

    let mut out = io::stdout().lock();
    for reaction in &reactions {
        let line = match serde_json::to_string(reaction) {
            Ok(line) => line,
            Err(err) => {
                eprintln!("Cannot encode reaction: {err}");
                process::exit(1);
            }
        };
        if writeln!(out, "{line}").is_err() {
            process::exit(1);
        }
    }
}
