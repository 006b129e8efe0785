//! # pbtail: Pruned Poisson-Binomial Tails for Pileup Columns
//!
//! ## Usage
//! ```bash
//! # Columns from a file, results to stdout
//! pbtail --input columns.tsv
//!
//! # stdin to file, with span timings
//! cat columns.tsv | pbtail --out dists.tsv --profile
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::time::Instant;

use pbtail::config::Config;
use pbtail::io::columns::{ColumnReader, DistributionWriter};
use pbtail::pipelines::BatchPipeline;
use pbtail::utils::threading::build_thread_pool;
use pbtail::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber; span timings only with `--profile`
fn init_tracing(profile: bool) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_level = if profile { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let span_events = if profile { FmtSpan::CLOSE } else { FmtSpan::NONE };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_span_events(span_events)
                .with_target(false)
                .with_timer(fmt::time::uptime()),
        )
        .init();
}

fn open_sink(config: &Config) -> Result<DistributionWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match &config.out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    Ok(DistributionWriter::new(sink))
}

fn stream_columns<R: BufRead>(
    config: &Config,
    pool: &rayon::ThreadPool,
    mut reader: ColumnReader<R>,
) -> Result<usize> {
    let mut writer = open_sink(config)?;
    let pipeline = BatchPipeline::new(config.exec_policy());
    let n_columns = pipeline.run_stream(pool, &mut reader, &mut writer, config.chunk_columns)?;
    writer.finish()?;
    Ok(n_columns)
}

fn run() -> Result<()> {
    let start = Instant::now();

    let config = Config::parse_and_validate()?;
    init_tracing(config.profile);

    let n_threads = config.nthreads();
    let pool = build_thread_pool(n_threads)?;
    tracing::info!(n_threads, input = %config.input.display(), "pbtail v{}", env!("CARGO_PKG_VERSION"));

    let n_columns = if config.reads_stdin() {
        stream_columns(&config, &pool, ColumnReader::new(io::stdin().lock()))?
    } else {
        stream_columns(&config, &pool, ColumnReader::open(&config.input)?)?
    };

    tracing::info!(n_columns, elapsed_secs = start.elapsed().as_secs_f64(), "completed");
    Ok(())
}
