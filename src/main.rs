//! rollchunk - print the chunk manifest of a file.
//!
//! Writes one `<start>\t<length>\t<hexdigest>` line per chunk to stdout.
//! Diagnostics go to stderr; set `RUST_LOG=debug` for more detail.

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rollchunk::config::{
    DEFAULT_CHAR_OFFSET, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_MIN_CHUNK_SIZE, DEFAULT_SPLIT_BITS,
    DEFAULT_WINDOW_SIZE,
};
use rollchunk::{ChunkConfig, HashAlgorithm, HashConfig, Source, manifest};

#[derive(Parser, Debug)]
#[command(name = "rollchunk", version)]
#[command(about = "Split a file into content-defined chunks and print its manifest", long_about = None)]
struct Args {
    /// File to chunk
    path: PathBuf,

    /// Chunks are only split by content once longer than this
    #[arg(long, default_value_t = DEFAULT_MIN_CHUNK_SIZE)]
    min_size: usize,

    /// Chunks are split unconditionally at this length
    #[arg(long, default_value_t = DEFAULT_MAX_CHUNK_SIZE)]
    max_size: usize,

    /// Low checksum bits that must all be set at a split point
    #[arg(long, default_value_t = DEFAULT_SPLIT_BITS)]
    split_bits: u32,

    /// Rolling window size in bytes
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    window_size: usize,

    /// Constant added to every byte by the rolling checksum
    #[arg(long, default_value_t = DEFAULT_CHAR_OFFSET)]
    char_offset: u32,

    /// Digest printed for each chunk
    #[arg(long, default_value_t = HashAlgorithm::Sha1)]
    hash: HashAlgorithm,

    /// Hash chunks on all cores after the boundary pass
    #[cfg(feature = "parallel")]
    #[arg(long)]
    parallel: bool,
}

impl Args {
    fn config(&self) -> Result<ChunkConfig> {
        let config = ChunkConfig::default()
            .with_min_size(self.min_size)
            .with_max_size(self.max_size)
            .with_split_bits(self.split_bits)
            .with_window_size(self.window_size)
            .with_char_offset(self.char_offset)
            .with_hash_config(HashConfig::with_algorithm(self.hash));
        config.validate()?;
        Ok(config)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = args.config()?;
    let source = Source::open(&args.path)?;
    info!(path = %args.path.display(), len = source.len(), "chunking");

    let stdout = BufWriter::new(io::stdout().lock());

    #[cfg(feature = "parallel")]
    if args.parallel {
        let entries = manifest::build_parallel(&source, config)?;
        let mut writer = manifest::ManifestWriter::new(stdout);
        for entry in &entries {
            writer.write_entry(entry).context("writing manifest")?;
        }
        writer.finish().context("writing manifest")?;
        debug!(chunks = entries.len(), "done");
        return Ok(());
    }

    let chunks = manifest::write_manifest(&source, config, stdout).context("writing manifest")?;
    debug!(chunks, "done");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("rollchunk: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
