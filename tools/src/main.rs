use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::{BlockFrames, CodecContext};
use glob::Pattern;
use terrawire_tools::{
    decode_capture, decode_capture_json, format_decode_pretty, format_inspect, init_logging,
    inspect_capture,
};

#[derive(Parser)]
#[command(
    name = "terrawire-tools",
    version,
    about = "terrawire capture inspection and decoding tools"
)]
struct Cli {
    /// Log codec decisions at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the frames in a capture.
    Inspect {
        /// Capture file, or a directory of capture files.
        capture_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected captures.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected captures (after sorting).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Decode every frame of a capture.
    Decode {
        /// Capture file.
        capture_file: PathBuf,
        /// JSON array of block ids that carry frame coordinates.
        #[arg(long)]
        frames: Option<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Inspect {
            capture_path,
            glob,
            sort,
            limit,
        } => {
            let ctx = CodecContext::default();
            if capture_path.is_dir() {
                let entries = collect_capture_entries(&capture_path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let bytes = fs::read(&entry.path)
                        .with_context(|| format!("read capture {}", entry.path.display()))?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    print!("{}", format_inspect(&inspect_capture(&bytes, &ctx)));
                }
            } else {
                let bytes = fs::read(&capture_path)
                    .with_context(|| format!("read capture {}", capture_path.display()))?;
                print!("{}", format_inspect(&inspect_capture(&bytes, &ctx)));
            }
        }
        Command::Decode {
            capture_file,
            frames,
            format,
        } => {
            let bytes = fs::read(&capture_file)
                .with_context(|| format!("read capture {}", capture_file.display()))?;
            let table = frames
                .as_deref()
                .map(load_frame_table)
                .transpose()
                .context("load frame table")?;
            let ctx = match &table {
                Some(table) => CodecContext::new(table),
                None => CodecContext::default(),
            };
            match format {
                DecodeFormat::Json => {
                    let json = decode_capture_json(&bytes, &ctx)?;
                    let json = serde_json::to_string_pretty(&json).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_decode_pretty(&decode_capture(&bytes, &ctx)));
                }
            }
        }
    }
    Ok(())
}

fn load_frame_table(path: &Path) -> Result<BlockFrames> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read frame table {}", path.display()))?;
    let table: BlockFrames = serde_json::from_str(&contents).context("parse frame table json")?;
    tracing::debug!(path = %path.display(), ids = table.len(), "loaded frame table");
    Ok(table)
}

struct CaptureEntry {
    path: PathBuf,
    size: u64,
}

fn collect_capture_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<CaptureEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(CaptureEntry { path, size });
    }
    Ok(entries)
}

fn maybe_sort_entries(
    mut entries: Vec<CaptureEntry>,
    sort: Option<InspectSort>,
) -> Vec<CaptureEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => {}
    }
    entries
}
