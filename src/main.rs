use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use huffdec::{
    CodeSource, HuffError, check_code_file_start, create_output, decode_code_file, load_decoder,
    output_path_for,
};
use tracing::{debug, error};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Decode a Huffman-coded token stream
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Header file mapping tokens to codes (<base>.hdr)
    header: PathBuf,

    /// Code file holding the bitstream (<base>.code)
    code: PathBuf,

    /// Directory containing the input files, also receives the output
    #[clap(long, default_value = "input_output")]
    dir: PathBuf,

    /// Output file (default: <dir>/<header stem>.tokens_decoded)
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Load the whole code file into memory instead of streaming it
    #[clap(long)]
    in_memory: bool,

    /// Enable verbose logging (can be specified multiple times)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Exit status for invalid command-line usage.
const USAGE_EXIT_CODE: u8 = 1;

/// Process exit status for each failure stage.
#[derive(Debug, Clone, Copy)]
enum Failure {
    Preflight = 2,
    CodeStart = 5,
    Header = 6,
    Build = 7,
    OutputNotWritable = 8,
    Decode = 9,
}

impl From<Failure> for ExitCode {
    fn from(failure: Failure) -> Self {
        ExitCode::from(failure as u8)
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version print to stdout and succeed
            err.print().ok();
            return if err.use_stderr() {
                ExitCode::from(USAGE_EXIT_CODE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("Error: failed to initialize logging: {err}");
    }

    match run(&cli) {
        Ok(count) => {
            debug!(tokens = count, "done");
            ExitCode::SUCCESS
        }
        Err((failure, msg)) => {
            error!(stage = ?failure, "{msg}");
            eprintln!("Error: {msg}");
            failure.into()
        }
    }
}

fn init_logging(verbose: u8) -> eyre::Result<()> {
    let filter = match verbose {
        0 => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "huffdec=warn".into()),
        1 => tracing_subscriber::EnvFilter::new("huffdec=debug"),
        _ => tracing_subscriber::EnvFilter::new("huffdec=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

fn run(cli: &Cli) -> Result<usize, (Failure, String)> {
    let dir = &cli.dir;
    if !dir.is_dir() {
        return Err((
            Failure::Preflight,
            format!("directory not found: {}", dir.display()),
        ));
    }

    // Only the file names are used, inputs always live in `dir`
    let header_path = resolve_in(dir, &cli.header)?;
    let code_path = resolve_in(dir, &cli.code)?;
    check_readable_file(&header_path)?;
    check_readable_file(&code_path)?;

    check_code_file_start(&code_path).map_err(|err| stage(Failure::CodeStart, &code_path, err))?;

    let decoder = load_decoder(&header_path).map_err(|err| {
        let failure = if err.is_build_error() {
            Failure::Build
        } else {
            Failure::Header
        };
        stage(failure, &header_path, err)
    })?;

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| output_path_for(dir, &header_path));
    let out = create_output(&output_path).map_err(|err| {
        (
            Failure::OutputNotWritable,
            format!("cannot open {} for writing: {err}", output_path.display()),
        )
    })?;

    let source = if cli.in_memory {
        CodeSource::InMemory
    } else {
        CodeSource::Streamed
    };
    decode_code_file(&decoder, &code_path, out, source)
        .map_err(|err| stage(Failure::Decode, &code_path, err))
}

fn resolve_in(dir: &Path, file: &Path) -> Result<PathBuf, (Failure, String)> {
    match file.file_name() {
        Some(name) => Ok(dir.join(name)),
        None => Err((
            Failure::Preflight,
            format!("not a file name: {}", file.display()),
        )),
    }
}

fn check_readable_file(path: &Path) -> Result<(), (Failure, String)> {
    let metadata = fs::metadata(path)
        .map_err(|err| (Failure::Preflight, format!("{}: {err}", path.display())))?;
    if !metadata.is_file() {
        return Err((
            Failure::Preflight,
            format!("not a regular file: {}", path.display()),
        ));
    }
    File::open(path)
        .map(|_| ())
        .map_err(|err| (Failure::Preflight, format!("unable to open {}: {err}", path.display())))
}

fn stage(failure: Failure, path: &Path, err: HuffError) -> (Failure, String) {
    let what = match failure {
        Failure::Header => "Error reading header",
        Failure::Build => "Error building Huffman tree",
        Failure::Decode => "Error decoding",
        _ => "Error",
    };
    (failure, format!("{what} ({}): {err}", path.display()))
}
