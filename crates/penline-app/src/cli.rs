// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and the segment-and-write flow behind them.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use penline_core::{LineRecord, MergeStrategy, Result, SegmentationConfig};
use penline_document::LineSegmenter;

/// Find, box, and number the lines of handwriting on a scanned page.
#[derive(Debug, Parser)]
#[command(name = "penline", version, about)]
pub struct Cli {
    /// Page image (PNG, JPEG, TIFF, ...).
    pub image: PathBuf,

    /// JSON segmentation config; missing fields use the defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the line list here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the config's fragment merge strategy.
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Emit single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Greedy,
    GlobalClustering,
}

impl From<StrategyArg> for MergeStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => MergeStrategy::Greedy,
            StrategyArg::GlobalClustering => MergeStrategy::GlobalClustering,
        }
    }
}

/// Resolve the effective config: file (if any), then CLI overrides.
pub fn load_config(args: &Cli) -> Result<SegmentationConfig> {
    let mut config = match &args.config {
        Some(path) => SegmentationConfig::from_json_file(path)?,
        None => SegmentationConfig::default(),
    };
    if let Some(strategy) = args.strategy {
        config.merge_strategy = strategy.into();
    }
    Ok(config)
}

/// Serialize the line list as `[{ "number": n, "box": [x, y, w, h] }, ...]`.
pub fn render(lines: &[LineRecord], compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(lines)?
    } else {
        serde_json::to_string_pretty(lines)?
    };
    Ok(json)
}

/// Segment the page named by `args` and write the result. Returns the number
/// of lines found.
pub fn run(args: &Cli) -> Result<usize> {
    let segmenter = LineSegmenter::new(load_config(args)?)?;
    tracing::debug!(
        method = ?segmenter.config().threshold_method,
        strategy = ?segmenter.config().merge_strategy,
        "Segmenter configured"
    );
    let lines = segmenter.segment_path(&args.image)?;
    let json = render(&lines, args.compact)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json + "\n")?;
            tracing::info!(path = %path.display(), "Line boxes written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(lines.len())
}
