//! Sheetling - a minimal spreadsheet with a line-oriented REPL.

mod render;
mod repl;

use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: sheetling [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]            CSV file to open on startup");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -h, --help        Print help");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut file_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if file_path.is_none() {
                    file_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    if let Err(e) = repl::run(file_path) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
