use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use textpatch::{apply_to_file, apply_to_text, decode_batch, decode_batch_from_reader, resolve_batch, EditOp, Error};

/// Apply a JSON line patch to a document.
///
/// The patch is an array of `{"line": N, "type": "insert"|"delete"|"replace", "content": [...]}`
/// objects with zero-based, non-decreasing line numbers. Each operation sees the
/// document as changed by the ones before it.
#[derive(Parser, Debug)]
#[command(name = "textpatch", version)]
struct Cli {
    /// Document to patch, or `-` to read it from stdin and print the result.
    file: String,

    /// Read the patch from this file (`-` for stdin).
    #[arg(short, long, value_name = "PATH", conflicts_with = "json", required_unless_present = "json")]
    patch: Option<String>,

    /// Inline patch JSON.
    #[arg(short, long, value_name = "JSON")]
    json: Option<String>,

    /// Write the result here instead of overwriting FILE.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the patched document to stdout and write nothing.
    #[arg(long)]
    dry_run: bool,

    /// Log at debug level (overridden by TEXTPATCH_LOG).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn stdin_document(&self) -> bool {
        self.file == "-"
    }
}

fn load_ops(cli: &Cli) -> Result<Vec<EditOp>, Error> {
    let wire = match (&cli.json, cli.patch.as_deref()) {
        (Some(json), _) => decode_batch(json)?,
        (None, Some("-")) => decode_batch_from_reader(io::stdin().lock())?,
        (None, Some(path)) => decode_batch(&fs::read_to_string(path)?)?,
        // clap enforces one of --patch/--json
        (None, None) => Vec::new(),
    };
    Ok(resolve_batch(&wire)?)
}

fn print_document(text: &str) -> Result<(), Error> {
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn run(cli: &Cli) -> Result<(), Error> {
    let ops = load_ops(cli)?;
    tracing::debug!(ops = ops.len(), file = %cli.file, "loaded patch");

    if cli.stdin_document() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        return print_document(&apply_to_text(&input, &ops)?);
    }

    let path = Path::new(&cli.file);
    if cli.dry_run {
        let text = fs::read_to_string(path)?;
        return print_document(&apply_to_text(&text, &ops)?);
    }

    apply_to_file(path, &ops, cli.output.as_deref())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    textpatch::logging::init(cli.verbose);

    if cli.stdin_document() {
        if cli.patch.as_deref() == Some("-") {
            eprintln!("error: document and patch cannot both come from stdin");
            return ExitCode::from(2);
        }
        if cli.output.is_some() {
            eprintln!("error: --output cannot be used when FILE is '-'");
            return ExitCode::from(2);
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            match e {
                Error::Io(_) => ExitCode::from(1),
                Error::Patch(_) => ExitCode::from(2),
            }
        }
    }
}
