//! Interactive command loop.
//!
//! Line-oriented REPL over a [`Document`]. The command keyword is
//! case-insensitive; arguments are split on whitespace except inside
//! double quotes, so `edit A0 "a b"` carries the quoted text as one
//! argument.

use anyhow::{Result, anyhow, bail};
use sheetling_core::{CellRef, Document};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::render;

const HELP: &str = "\
commands:
  edit <position> <value>   set a cell (position is letter+row, e.g. B3)
  print                     render the current table
  open <path>               load a .csv file
  close                     close the current file
  new <path>                create an empty .csv file
  save                      save to the current file
  saveas <path>             save to another file
  help                      show this help
  exit                      quit";

/// Confirmation seam so command handling is scriptable in tests.
pub trait Prompt {
    /// Ask a yes/no question; true means yes.
    fn confirm(&mut self, question: &str) -> bool;
}

struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm(&mut self, question: &str) -> bool {
        let stdin = std::io::stdin();
        loop {
            print!("{} Y/N: ", question);
            let _ = std::io::stdout().flush();
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => return false,
                Ok(_) => {}
            }
            match line.trim() {
                "Y" | "y" => return true,
                "N" | "n" => return false,
                _ => {}
            }
        }
    }
}

/// Run the REPL until `exit` or end of input.
pub fn run(file_path: Option<PathBuf>) -> Result<()> {
    let mut doc = Document::new();
    let mut prompt = StdinPrompt;

    if let Some(path) = file_path {
        match open_file(&mut doc, &path) {
            Ok(summary) => println!("{}", summary),
            Err(e) => eprintln!("FAIL: {}", e),
        }
    }

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") {
            if doc.modified
                && doc.file_path.is_some()
                && prompt.confirm("Unsaved changes. Save before exiting?")
            {
                if let Err(e) = doc.save() {
                    eprintln!("FAIL: {}", e);
                    continue;
                }
            }
            break;
        }

        match execute(&mut doc, &mut prompt, line) {
            Ok(output) => println!("  OK: {}", output),
            Err(e) => eprintln!("FAIL: {}", e),
        }
    }

    println!("Goodbye");
    Ok(())
}

/// Execute one command line against the document. Returns printable
/// output.
pub fn execute(doc: &mut Document, prompt: &mut dyn Prompt, line: &str) -> Result<String> {
    let args = split_with_quotes(line)?;
    let Some(command) = args.first() else {
        bail!("empty command");
    };

    match command.to_ascii_uppercase().as_str() {
        "EDIT" => {
            let [_, pos, value] = args.as_slice() else {
                bail!("usage: edit <position> <value>");
            };
            let cell = CellRef::parse(pos)
                .ok_or_else(|| anyhow!("invalid cell position: {}", pos))?;
            doc.set_cell(cell.row, cell.col, value)?;
            Ok(format!("set {} to {}", cell, value))
        }
        "PRINT" => {
            if args.len() != 1 {
                bail!("usage: print");
            }
            Ok(render::render_table(&doc.grid))
        }
        "OPEN" => {
            let [_, path] = args.as_slice() else {
                bail!("usage: open <path>");
            };
            let path = PathBuf::from(unquote(path));
            close_current(doc, prompt)?;
            open_file(doc, &path)
        }
        "CLOSE" => {
            if args.len() != 1 {
                bail!("usage: close");
            }
            close_current(doc, prompt)?;
            Ok("closed".to_string())
        }
        "NEW" => {
            let [_, path] = args.as_slice() else {
                bail!("usage: new <path>");
            };
            let path = PathBuf::from(unquote(path));
            close_current(doc, prompt)?;
            if path.exists() && !prompt.confirm("File exists. Overwrite?") {
                return Ok("cancelled".to_string());
            }
            Document::create_empty(&path)?;
            Ok(format!("created {}", path.display()))
        }
        "SAVE" => {
            if doc.file_path.is_none() {
                bail!("no file opened");
            }
            let path = doc.save()?;
            Ok(format!("saved {}", path.display()))
        }
        "SAVEAS" => {
            let [_, path] = args.as_slice() else {
                bail!("usage: saveas <path>");
            };
            let path = PathBuf::from(unquote(path));
            if path.exists()
                && doc.file_path.as_deref() != Some(path.as_path())
                && !prompt.confirm("File exists. Overwrite?")
            {
                return Ok("cancelled".to_string());
            }
            doc.save_as(&path)?;
            Ok(format!("saved {}", path.display()))
        }
        "HELP" => Ok(HELP.to_string()),
        other => bail!("unknown command: {}", other),
    }
}

/// Prompt to save unsaved changes, then drop everything.
fn close_current(doc: &mut Document, prompt: &mut dyn Prompt) -> Result<()> {
    if doc.file_path.is_some() && doc.modified && prompt.confirm("File not saved. Save?") {
        doc.save()?;
    }
    doc.reset();
    Ok(())
}

fn open_file(doc: &mut Document, path: &Path) -> Result<String> {
    let report = doc.open(path)?;
    let mut summary = format!(
        "loaded {} [{}/{} fields]",
        path.display(),
        report.loaded,
        report.total
    );
    for failure in &report.failures {
        summary.push_str(&format!(
            "\n  {}: {:?} rejected ({})",
            CellRef::new(failure.row, failure.col),
            failure.input,
            failure.reason
        ));
    }
    Ok(summary)
}

/// Split a command line on whitespace, keeping quoted stretches (quotes
/// included) inside a single argument.
fn split_with_quotes(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push('"');
            }
            _ => current.push(c),
        }
    }
    if in_quotes {
        bail!("not every opening quote has a closing one");
    }
    if !current.is_empty() {
        args.push(current);
    }
    Ok(args)
}

/// Strip one pair of surrounding quotes, for quoted path arguments.
fn unquote(arg: &str) -> String {
    if arg.len() >= 2 && arg.starts_with('"') && arg.ends_with('"') {
        arg[1..arg.len() - 1].to_string()
    } else {
        arg.to_string()
    }
}
