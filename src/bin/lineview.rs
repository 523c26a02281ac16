use std::fs;
use std::process::ExitCode;

use clap::Parser;
use textpatch::split_lines;

/// Print a document as `<index>  <content>`, using the zero-based positions a patch addresses.
#[derive(Parser, Debug)]
#[command(name = "lineview", version)]
struct Cli {
    file: String,
    /// First line to print (zero-based, inclusive).
    start: Option<usize>,
    /// Last line to print (zero-based, inclusive). Defaults to START.
    end: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    textpatch::logging::init(false);

    let text = match fs::read_to_string(&cli.file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", cli.file);
            return ExitCode::from(1);
        }
    };

    let lines = split_lines(&text);
    let last = lines.len() - 1;

    let (start, end) = match (cli.start, cli.end) {
        (None, _) => (0, last),
        (Some(s), None) => (s, s),
        (Some(s), Some(e)) => (s, e),
    };

    if end < start {
        eprintln!("error: end must be >= start");
        return ExitCode::from(2);
    }
    if end > last {
        eprintln!("error: line {end} is beyond the last line ({last})");
        return ExitCode::from(2);
    }

    for (idx, line) in lines.iter().enumerate().take(end + 1).skip(start) {
        println!("{idx}  {line}");
    }
    ExitCode::SUCCESS
}
