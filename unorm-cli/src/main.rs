//! unorm CLI
//!
//! Streams UTF-8 from a file or stdin through a normalizer and writes the
//! result to stdout, one chunk at a time.
//!
//! - `unorm NFC notes.txt`          # normalize a file
//! - `unorm --check NFD < notes.txt` # exit 0 if already NFD

use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use unorm_common::warning::warn_once;
use unorm_unicode::{Form, Normalizer, NormalizerOptions};

/// Bytes read per chunk unless `--chunk-size` says otherwise.
const DEFAULT_CHUNK_SIZE: usize = 4096;

/// unorm: streaming Unicode normalizer (NFC, NFD, NFKC, NFKD)
#[derive(Parser, Debug)]
#[command(name = "unorm")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Normalize a file to NFC
    unorm NFC notes.txt

    # Normalize stdin to NFKD
    echo 'ﬁ' | unorm nfkd

    # Check without writing output (exit status 1 if normalization may change it)
    unorm --check NFC notes.txt

    # Use buffer settings from a JSON file
    unorm --config unorm.json NFD notes.txt
"#)]
struct Cli {
    /// Normalization form (case-insensitive)
    #[arg(value_name = "FORM")]
    form: Form,

    /// File to read (default: stdin)
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Only run the quick check and report the verdict
    #[arg(long)]
    check: bool,

    /// Flush finalized output once the buffer holds this many entries
    #[arg(long, value_name = "ENTRIES")]
    flush_threshold: Option<usize>,

    /// Bytes read per chunk
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// JSON file with normalizer options
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}

/// Returns `false` only when `--check` finds input that may need normalizing.
fn run(cli: &Cli) -> Result<bool> {
    let options = load_options(cli)?;
    let mut normalizer = Normalizer::with_options(cli.form, options)
        .context("failed to reserve the normalization buffer")?;

    let chunk_size = if cli.chunk_size == 0 {
        warn_once("cli", "--chunk-size 0 treated as 1");
        1
    } else {
        cli.chunk_size
    };

    let input = open_input(cli.path.as_deref())?;
    let source = cli
        .path
        .as_ref()
        .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());

    if cli.check {
        let normalized = check_stream(&mut normalizer, input, chunk_size)?;
        print_verdict(&source, cli.form, normalized);
        return Ok(normalized);
    }

    let mut out = BufWriter::new(io::stdout().lock());
    normalize_stream(&mut normalizer, input, &mut out, chunk_size)?;
    out.flush().context("failed to write output")?;
    Ok(true)
}

/// Options from `--config`, then overridden by `--flush-threshold`.
fn load_options(cli: &Cli) -> Result<NormalizerOptions> {
    let mut options = match cli.config {
        Some(ref path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => NormalizerOptions::default(),
    };

    if let Some(threshold) = cli.flush_threshold {
        options.flush_threshold = threshold;
    }
    Ok(options)
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Read the next chunk, retrying on interruption. `0` means end of input.
fn read_chunk(input: &mut impl Read, chunk: &mut [u8]) -> Result<usize> {
    loop {
        match input.read(chunk) {
            Ok(n) => return Ok(n),
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => return Err(err).context("failed to read input"),
        }
    }
}

/// Normalize everything from `input` into `output`.
fn normalize_stream(
    normalizer: &mut Normalizer,
    mut input: impl Read,
    output: &mut impl Write,
    chunk_size: usize,
) -> Result<()> {
    let mut sink = |bytes: &[u8]| -> Result<()> {
        output.write_all(bytes).context("failed to write output")
    };

    let mut chunk = vec![0_u8; chunk_size];
    loop {
        let n = read_chunk(&mut input, &mut chunk)?;
        if n == 0 {
            break;
        }
        normalizer.normalize(&chunk[..n], false, &mut sink)?;
    }
    normalizer.normalize_end(&mut sink)
}

/// Quick-check everything from `input`, stopping at the first failure.
fn check_stream(normalizer: &mut Normalizer, mut input: impl Read, chunk_size: usize) -> Result<bool> {
    let mut chunk = vec![0_u8; chunk_size];
    loop {
        let n = read_chunk(&mut input, &mut chunk)?;
        if n == 0 {
            return Ok(normalizer.quick_check_end());
        }
        if !normalizer.quick_check(&chunk[..n], false) {
            return Ok(false);
        }
    }
}

fn print_verdict(source: &str, form: Form, normalized: bool) {
    if normalized {
        println!("{source}: {} {form}", "✓ already".green().bold());
    } else {
        println!("{source}: {} {form}", "✗ not confirmed".red().bold());
    }
}
