// this_file: src/main.rs

//! pixfont CLI: bake a font into a packed 1-bit glyph table.
//!
//! Single bakes write their export to `--output` (stdout if omitted);
//! batch mode reads a JSON job spec and prints one JSONL result per job.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use pixfont::{
    export_font, parse_codepoint, process_jobs, write_output, Baker, BdfBaker, CodepointRange,
    JobSpec, OutlineBaker, OutlineParams, OutputFormat, PixelFont,
};
use std::io::{self, Read, Write};

/// Largest accepted job spec (10MB)
const MAX_JSON_SIZE: usize = 10 * 1024 * 1024;

/// pixfont: bake outline and BDF fonts into embedded bitmap tables
#[derive(Parser)]
#[command(name = "pixfont")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rasterize a TrueType/OpenType font at a fixed cell height
    Outline {
        /// Font file (.ttf, .otf)
        font: Utf8PathBuf,

        /// Cell height in pixels
        #[arg(long, default_value = "16")]
        height: u16,

        /// Coverage at or above this level sets a pixel
        #[arg(long, default_value = "128")]
        threshold: u8,

        /// Supersampling factor per axis (1..=8)
        #[arg(long, default_value = "1")]
        oversample: u8,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Convert a BDF bitmap font
    Bdf {
        /// BDF file
        font: Utf8PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Run a JSON job spec from a file (or stdin if omitted), JSONL results on stdout
    Batch {
        /// Input file path (reads stdin if not provided)
        #[arg(short, long)]
        input: Option<Utf8PathBuf>,

        /// Number of parallel worker threads (0 = auto)
        #[arg(long = "jobs", default_value = "0", alias = "workers")]
        jobs: usize,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print version information
    Version,
}

#[derive(clap::Args)]
struct CommonArgs {
    /// First code point (decimal, 0x41 or U+0041)
    #[arg(long, default_value = "0x20", value_parser = codepoint_arg)]
    start: u32,

    /// Last code point, inclusive
    #[arg(long, default_value = "0x7E", value_parser = codepoint_arg)]
    end: u32,

    /// Export format
    #[arg(short, long, value_enum, default_value = "c")]
    format: Format,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// C identifier of the font descriptor
    #[arg(long)]
    name: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Bin,
    C,
    Png,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Bin => OutputFormat::Bin,
            Format::C => OutputFormat::C,
            Format::Png => OutputFormat::Png,
        }
    }
}

fn codepoint_arg(text: &str) -> Result<u32, String> {
    parse_codepoint(text).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Outline {
            font,
            height,
            threshold,
            oversample,
            common,
        } => {
            init_logging(common.verbose);
            let baker = OutlineBaker::new(
                font.as_std_path(),
                OutlineParams::new(height, threshold, oversample),
            );
            run_single(&baker, &font, &common)?;
        }
        Commands::Bdf { font, common } => {
            init_logging(common.verbose);
            let baker = BdfBaker::new(font.as_std_path());
            run_single(&baker, &font, &common)?;
        }
        Commands::Batch {
            input,
            jobs,
            verbose,
        } => {
            init_logging(verbose);
            run_batch(input, jobs)?;
        }
        Commands::Version => {
            println!("pixfont {}", env!("CARGO_PKG_VERSION"));
            println!("Bitmap font baker for embedded displays");
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

fn run_single(baker: &dyn Baker, font_path: &Utf8Path, args: &CommonArgs) -> anyhow::Result<()> {
    let range = CodepointRange::new(args.start, args.end)?;
    let font: PixelFont = baker
        .bake(range)
        .with_context(|| format!("{} bake of {font_path} failed", baker.name()))?;
    log::info!(
        "baked {} glyphs at {}x{} ({} bytes)",
        font.glyph_count(),
        font.char_px_width(),
        font.char_px_height(),
        font.table().len()
    );

    let format = OutputFormat::from(args.format);
    match &args.output {
        Some(path) => write_output(&font, path, format, args.name.as_deref())?,
        None => {
            let bytes = export_font(&font, format, args.name.as_deref())?;
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(&bytes)?;
            handle.flush()?;
        }
    }
    Ok(())
}

/// Read the whole spec, bake in parallel, print results as JSONL.
fn run_batch(input: Option<Utf8PathBuf>, workers: usize) -> anyhow::Result<()> {
    let json = match input {
        Some(path) => std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("cannot read job spec {path}"))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    if json.len() > MAX_JSON_SIZE {
        anyhow::bail!("job spec is {} bytes, max {MAX_JSON_SIZE}", json.len());
    }

    let spec: JobSpec = serde_json::from_str(&json).context("invalid job spec JSON")?;
    spec.validate()?;
    log::info!("Starting batch ({} jobs, workers={workers})", spec.jobs.len());

    let results = process_jobs(&spec.jobs, workers)?;
    let failed = results.iter().filter(|r| r.status != "success").count();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for result in &results {
        writeln!(handle, "{}", serde_json::to_string(result)?)?;
    }
    handle.flush()?;

    log::info!("Batch complete ({} jobs, {failed} failed)", results.len());
    Ok(())
}
