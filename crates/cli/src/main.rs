//! pitfill CLI - local minima filling for raw band grids

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use pitfill_algorithms::fill::{fill_minima, pit_depth, FillMinimaParams, FillStats};
use pitfill_core::io::{read_header, read_raw_i16, write_raw_i16, BandHeader};
use pitfill_core::{Connectivity, Raster};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "pitfill")]
#[command(author, version, about = "Fill local minima in raw band grids", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a band header and, optionally, statistics of band files
    Info {
        /// Header file (background levels, rows, cols)
        header: PathBuf,
        /// Band files to summarize
        bands: Vec<PathBuf>,
        /// No-data value
        #[arg(long, default_value = "-9999", allow_hyphen_values = true)]
        null: i16,
    },
    /// Fill local minima in a single band
    Fill {
        /// Input band file (raw i16, row-major)
        input: PathBuf,
        /// Output file
        output: PathBuf,
        #[command(flatten)]
        shape: ShapeArgs,
        /// Flood height seeds are pinned to
        #[arg(short, long, allow_hyphen_values = true)]
        boundary: i16,
        #[command(flatten)]
        fill: FillArgs,
    },
    /// Fill both bands named by a header, as the shadow-mask pipeline does
    Pair {
        /// Header file; its two background levels are the boundary values
        #[arg(long, default_value = "b4_b5.txt")]
        header: PathBuf,
        /// First band input
        #[arg(long, default_value = "b4.bin")]
        first: PathBuf,
        /// Second band input
        #[arg(long, default_value = "b5.bin")]
        second: PathBuf,
        /// First band output
        #[arg(long, default_value = "filled_b4.bin")]
        first_out: PathBuf,
        /// Second band output
        #[arg(long, default_value = "filled_b5.bin")]
        second_out: PathBuf,
        /// Override the first band's boundary value
        #[arg(long, allow_hyphen_values = true)]
        first_boundary: Option<i16>,
        /// Override the second band's boundary value
        #[arg(long, allow_hyphen_values = true)]
        second_boundary: Option<i16>,
        #[command(flatten)]
        fill: FillArgs,
    },
    /// Pit depth: filled minus original, per cell
    Depth {
        /// Original band file
        original: PathBuf,
        /// Filled band file
        filled: PathBuf,
        /// Output file
        output: PathBuf,
        #[command(flatten)]
        shape: ShapeArgs,
        /// No-data value
        #[arg(long, default_value = "-9999", allow_hyphen_values = true)]
        null: i16,
    },
}

/// Grid shape, either explicit or taken from a header file
#[derive(Args)]
struct ShapeArgs {
    /// Header file to take rows/cols from
    #[arg(long, conflicts_with_all = ["rows", "cols"])]
    header: Option<PathBuf>,
    /// Number of rows
    #[arg(long, requires = "cols")]
    rows: Option<usize>,
    /// Number of columns
    #[arg(long, requires = "rows")]
    cols: Option<usize>,
}

/// Options shared by every fill command
#[derive(Args)]
struct FillArgs {
    /// No-data value
    #[arg(long, default_value = "-9999", allow_hyphen_values = true)]
    null: i16,
    /// Neighbour connectivity: 4, 8 or diagonal
    #[arg(short, long, default_value = "8")]
    connectivity: String,
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn resolve_shape(shape: &ShapeArgs) -> Result<(usize, usize)> {
    match (&shape.header, shape.rows, shape.cols) {
        (Some(path), _, _) => {
            let header = load_header(path)?;
            Ok((header.rows, header.cols))
        }
        (None, Some(rows), Some(cols)) => Ok((rows, cols)),
        _ => anyhow::bail!("Grid shape needed: pass --header or both --rows and --cols"),
    }
}

fn shape_label(rows: usize, cols: usize) -> String {
    format!("{} rows x {} cols", rows, cols)
}

fn load_header(path: &Path) -> Result<BandHeader> {
    let header = read_header(path)
        .with_context(|| format!("Failed to read header {}", path.display()))?;
    debug!(
        "Header {}: backgrounds {:?}, {}",
        path.display(),
        header.backgrounds,
        shape_label(header.rows, header.cols)
    );
    Ok(header)
}

fn read_band(path: &Path, rows: usize, cols: usize) -> Result<Raster<i16>> {
    let pb = spinner("Reading band...");
    let band = read_raw_i16(path, rows, cols)
        .with_context(|| format!("Failed to read band {}", path.display()))?;
    pb.finish_and_clear();
    info!("Input {}: {}", path.display(), shape_label(band.rows(), band.cols()));
    Ok(band)
}

fn write_band(band: &Raster<i16>, path: &Path) -> Result<()> {
    let pb = spinner("Writing output...");
    write_raw_i16(band, path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    pb.finish_and_clear();
    Ok(())
}

fn parse_connectivity(value: &str) -> Result<Connectivity> {
    value
        .parse::<Connectivity>()
        .map_err(|e| anyhow::anyhow!("Invalid connectivity: {}", e))
}

fn header_boundary(header: &BandHeader, band: usize) -> Result<i16> {
    let level = header
        .boundary_level(band)
        .with_context(|| format!("Bad background level for band {}", band + 1))?;
    i16::try_from(level)
        .with_context(|| format!("Background level {} does not fit a 16-bit band", level))
}

fn fill_band(
    band: &Raster<i16>,
    boundary: i16,
    fill: &FillArgs,
    label: &str,
) -> Result<Raster<i16>> {
    let params =
        FillMinimaParams::new(fill.null, boundary).with_connectivity(parse_connectivity(&fill.connectivity)?);

    let pb = spinner(&format!("Filling {}...", label));
    let filled = fill_minima(band, &params)
        .with_context(|| format!("Failed to fill minima in {}", label))?;
    pb.finish_and_clear();

    report(label, boundary, params.connectivity, &filled.stats);
    Ok(filled.raster)
}

fn report(label: &str, boundary: i16, connectivity: Connectivity, stats: &FillStats) {
    info!(
        "{}: levels [{}, {}], boundary {}, {}-connected, {} seeds from {}",
        label, stats.h_min, stats.h_max, boundary, connectivity, stats.seeds, stats.seed_source
    );
    info!(
        "{}: {} cells filled, {} no-data",
        label, stats.processed, stats.null_count
    );
    if stats.unreached > 0 {
        warn!(
            "{}: {} valid cells not reachable from any seed; left at {}",
            label, stats.unreached, stats.h_max
        );
    }
}

fn done(name: &str, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Info { header, bands, null } => {
            let header = load_header(&header)?;
            println!("Rows:        {}", header.rows);
            println!("Columns:     {}", header.cols);
            println!("Background:  {:.6} / {:.6}", header.backgrounds[0], header.backgrounds[1]);
            let band_bytes = header
                .band_bytes()
                .context("Header dimensions do not describe an addressable band")?;
            println!("Band size:   {} bytes", band_bytes);

            for path in &bands {
                let band = read_band(path, header.rows, header.cols)?.with_nodata(null);
                let stats = band.statistics();
                println!("{}:", path.display());
                match (stats.min, stats.max, stats.mean) {
                    (Some(min), Some(max), Some(mean)) => {
                        println!("  Min:   {}", min);
                        println!("  Max:   {}", max);
                        println!("  Mean:  {:.2}", mean);
                    }
                    _ => println!("  (no valid data)"),
                }
                println!("  Valid: {}", stats.valid_count);
                println!("  Null:  {}", stats.nodata_count);
            }
        }

        Commands::Fill {
            input,
            output,
            shape,
            boundary,
            fill,
        } => {
            let (rows, cols) = resolve_shape(&shape)?;
            let band = read_band(&input, rows, cols)?;
            let start = Instant::now();
            let result = fill_band(&band, boundary, &fill, "band")?;
            let elapsed = start.elapsed();
            write_band(&result, &output)?;
            done("Filled band", &output, elapsed);
        }

        Commands::Pair {
            header,
            first,
            second,
            first_out,
            second_out,
            first_boundary,
            second_boundary,
            fill,
        } => {
            info!("Start running fillminima");
            let header = load_header(&header)?;
            let boundaries = [
                match first_boundary {
                    Some(b) => b,
                    None => header_boundary(&header, 0)?,
                },
                match second_boundary {
                    Some(b) => b,
                    None => header_boundary(&header, 1)?,
                },
            ];

            // Read both inputs before writing anything.
            let bands = [
                read_band(&first, header.rows, header.cols)?,
                read_band(&second, header.rows, header.cols)?,
            ];

            let jobs = [(&first, &first_out), (&second, &second_out)];
            for (i, (band, (input, output))) in bands.iter().zip(jobs).enumerate() {
                let start = Instant::now();
                let label = input.display().to_string();
                let result = fill_band(band, boundaries[i], &fill, &label)?;
                let elapsed = start.elapsed();
                write_band(&result, output)?;
                done("Filled band", output, elapsed);
            }
            info!("Success running fillminima");
        }

        Commands::Depth {
            original,
            filled,
            output,
            shape,
            null,
        } => {
            let (rows, cols) = resolve_shape(&shape)?;
            let orig = read_band(&original, rows, cols)?;
            let fill = read_band(&filled, rows, cols)?;
            let start = Instant::now();
            let result = pit_depth(&orig, &fill, null).context("Failed to compute pit depth")?;
            let elapsed = start.elapsed();
            write_band(&result, &output)?;
            done("Pit depth", &output, elapsed);
        }
    }

    Ok(())
}
