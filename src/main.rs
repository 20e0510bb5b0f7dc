use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use raw_stack_stats::image_pipeline::{
    BatchReport, FileStats, Geometry, LegacyTable, PipelineConfig, RawFileSource,
    RawToStatsPipeline, StatsError, LEGACY_SCHEMA,
};
use raw_stack_stats::logger;

use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "raw-stack-stats")]
#[command(about = "Per-channel means of stacked raw rasters")]
struct Args {
    /// Directory holding the raw files
    #[arg(short = 'p', long)]
    path: PathBuf,

    /// Process only this file from the directory
    #[arg(short = 'f', long)]
    fname: Option<String>,

    /// Extension of the raw files when no file name is given
    #[arg(short = 'e', long, default_value = "raw")]
    ext: String,

    /// Number of images stacked in each file
    #[arg(short = 'n', long)]
    stack_depth: usize,

    /// Rows per stacked image
    #[arg(long)]
    rows: usize,

    /// Columns per stacked image
    #[arg(long)]
    cols: usize,

    /// Interleaved channels per pixel
    #[arg(long)]
    channels: usize,

    /// Worker threads (defaults to one per core)
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Print every block and channel instead of the legacy columns
    #[arg(long)]
    full: bool,

    /// Reject files holding more blocks than the stack depth
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure worker pool")?;
    }

    let geometry = Geometry::new(args.stack_depth, args.rows, args.cols, args.channels)?;
    let config = PipelineConfig::builder(geometry)
        .strict_length(args.strict)
        .build();
    let pipeline = RawToStatsPipeline::new(config);

    info!(
        stack_depth = geometry.stack_depth(),
        rows = geometry.rows(),
        cols = geometry.cols(),
        channels = geometry.channels(),
        "Raw stack statistics pipeline initialized"
    );

    let source = match &args.fname {
        Some(name) => RawFileSource::single(&args.path, name.as_str()),
        None => RawFileSource::by_extension(&args.path, &args.ext),
    };

    let mut report = match source.load_all() {
        Ok((files, read_failures)) => {
            let mut report = pipeline.process_files(&files);
            report.failures.extend(read_failures);
            report
        }
        Err(StatsError::EmptyInputError) => {
            warn!(dir = %args.path.display(), "No matching raw files");
            BatchReport::default()
        }
        Err(e) => return Err(anyhow::Error::new(e).context("failed to list input files")),
    };
    report.sort_by_filename();

    if args.full {
        print_full_table(&report.records);
    } else {
        let table = report.legacy_table();
        for failure in &table.failures {
            warn!(file = %failure.filename(), error = %failure.error, "Omitted from legacy table");
        }
        print_legacy_table(&table);
    }

    for failure in &report.failures {
        error!(file = %failure.identifier, error = %failure.error, "Processing failed");
    }

    Ok(())
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(str::len).max().unwrap_or(0).max(LEGACY_SCHEMA[0].len())
}

fn print_legacy_table(table: &LegacyTable) {
    let width = name_width(table.rows.iter().map(|r| r.filename.as_str()));

    println!(
        "{:<width$} {:>12} {:>12} {:>12}",
        LEGACY_SCHEMA[0], LEGACY_SCHEMA[1], LEGACY_SCHEMA[2], LEGACY_SCHEMA[3]
    );
    for row in &table.rows {
        println!(
            "{:<width$} {:>12.6} {:>12.6} {:>12.6}",
            row.filename, row.ch0, row.ch1, row.ch2
        );
    }
}

fn print_full_table(records: &[FileStats]) {
    let width = name_width(records.iter().map(|r| r.filename.as_str()));

    // files in one run share a geometry, so the first header fits all rows
    let columns = records
        .first()
        .map(|r| r.means.column_names())
        .unwrap_or_default();

    let header: Vec<String> = columns.iter().map(|c| format!("{:>12}", c)).collect();
    println!("{:<width$} {}", LEGACY_SCHEMA[0], header.join(" "));

    for record in records {
        let values: Vec<String> = record
            .means
            .row()
            .iter()
            .map(|v| format!("{:>12.6}", v))
            .collect();
        println!("{:<width$} {}", record.filename, values.join(" "));
    }
}
