// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Penline — number the lines of a handwritten page.
//
// Entry point. Initialises logging, loads the segmentation config, segments the
// page, and writes the numbered line boxes as JSON.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use penline_core::human_errors::humanize_error;

use cli::Cli;

fn main() -> ExitCode {
    // Logs go to stderr so the JSON on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    tracing::info!(image = %args.image.display(), "Penline starting");

    match cli::run(&args) {
        Ok(count) => {
            tracing::info!(lines = count, "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "segmentation failed");
            let human = humanize_error(&err);
            eprintln!("{}\n{}", human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}
