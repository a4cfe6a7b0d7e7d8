use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use qr_core::{CodeEcc, QrCode, QrError, Segment, Symbol, Version};
use qr_image::{ascii_text, gif_data_url, html_table, png_data_url, svg_path};
use tracing::{debug, info, instrument};

#[derive(Parser)]
#[command(name = "qr-cli", version, about = "Generate QR Code symbols from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text into a QR Code symbol and render it.
    Encode(EncodeArgs),
}

#[derive(clap::Args)]
struct EncodeArgs {
    /// Text to encode.
    text: String,

    /// Error correction level: L, M, Q, or H.
    #[arg(long, default_value = "M")]
    level: String,

    /// Segment mode (Numeric, Alphanumeric, Byte, Kanji), or Auto to let
    /// the encoder pick the shortest fit.
    #[arg(long, default_value = "Auto")]
    mode: String,

    /// Symbol version (1-40), or 0 to auto-select the smallest that fits.
    #[arg(long, default_value_t = 0)]
    version: u8,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Png)]
    format: Format,

    /// Pixels (PNG/GIF) or characters (ASCII/HTML/SVG) per module.
    #[arg(long)]
    cell_size: Option<i32>,

    /// Quiet-zone width in modules.
    #[arg(long)]
    margin: Option<i32>,

    /// Output file path; defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum)]
enum Format {
    Ascii,
    Gif,
    Png,
    Html,
    Svg,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encode(args) => run_encode(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            exit_code_for(&err)
        }
    }
}

/// Maps every `QrError` variant reachable from an error's cause chain to a
/// distinct process exit code, so a caller scripting against `qr-cli` can
/// branch on failure kind without parsing stderr. Errors with no `QrError`
/// in their chain (argument parsing, I/O) fall back to 1.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    let code = match err.chain().find_map(|cause| cause.downcast_ref::<QrError>()) {
        Some(QrError::BadErrorLevel) => 10,
        Some(QrError::BadMode) => 11,
        Some(QrError::BadCharacter(..)) => 12,
        Some(QrError::BadKanji(_)) => 13,
        Some(QrError::CodeOverflow { .. }) => 14,
        Some(QrError::SegmentTooLong) => 15,
        Some(QrError::OutOfRange) => 16,
        Some(QrError::NotReady) => 17,
        Some(QrError::Internal) => 18,
        _ => 1,
    };
    ExitCode::from(code)
}

fn run_encode(args: EncodeArgs) -> Result<()> {
    let qr = if args.mode.eq_ignore_ascii_case("auto") {
        build_auto(&args.text, &args.level, args.version)?
    } else {
        build_explicit(&args.text, &args.level, &args.mode, args.version)?
    };
    info!(
        version = qr.version().value(),
        mask = qr.mask().value(),
        size = qr.size(),
        "built symbol"
    );

    let cell_size = args.cell_size;
    let margin = args.margin;
    let rendered = match args.format {
        Format::Ascii => ascii_text(&qr, cell_size, margin),
        Format::Gif => gif_data_url(&qr, cell_size, margin),
        Format::Png => png_data_url(&qr, cell_size, margin, None, None),
        Format::Html => html_table(&qr, cell_size, margin),
        Format::Svg => svg_path(&qr, cell_size, margin),
    };

    match args.out {
        Some(path) => {
            fs::write(&path, &rendered).with_context(|| format!("writing {}", path.display()))?;
            debug!(path = %path.display(), "wrote output file");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn version_range(version: u8) -> (Version, Version) {
    if version == 0 {
        (Version::MIN, Version::MAX)
    } else {
        let v = Version::new(version);
        (v, v)
    }
}

#[instrument(skip(text))]
fn build_auto(text: &str, level: &str, version: u8) -> Result<QrCode> {
    let level = CodeEcc::from_letter(level).map_err(|e| anyhow::anyhow!(e))?;
    let segs = Segment::make_segments(text).map_err(|e| anyhow::anyhow!(e))?;
    let (minversion, maxversion) = version_range(version);
    debug!(?minversion, ?maxversion, "auto-selecting version");
    QrCode::encode_segments_advanced(&segs, level, minversion, maxversion, None)
        .map_err(|e| anyhow::anyhow!(e))
        .context("encoding symbol")
}

#[instrument(skip(text))]
fn build_explicit(text: &str, level: &str, mode: &str, version: u8) -> Result<QrCode> {
    let mut sym = Symbol::create(version, level).map_err(|e| anyhow::anyhow!(e))?;
    sym.add_data(text, mode).map_err(|e| anyhow::anyhow!(e))?;
    sym.make().map_err(|e| anyhow::anyhow!(e)).context("building symbol")?;
    Ok(sym.as_code().map_err(|e| anyhow::anyhow!(e))?.clone())
}
