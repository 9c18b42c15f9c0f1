use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mathdoku::core::logger;
use mathdoku::{recognize_from_path, MathdokuError, RecognitionContext};
use mathdoku_ocr::TesseractCliEngine;

/// Recover a Mathdoku puzzle's structural spec from a screenshot.
#[derive(Parser, Debug)]
#[command(name = "mathdoku-ocr", version)]
struct Cli {
    /// Path to the puzzle screenshot (PNG, JPEG, or equivalent).
    image: PathBuf,

    /// Force the grid size instead of auto-selecting it.
    #[arg(long, value_parser = clap::value_parser!(u8).range(4..=9))]
    size: Option<u8>,

    /// Write the result to this path instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Raise the log level to debug.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_with_level(if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info });

    let engine = match TesseractCliEngine::locate() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(1);
        }
    };

    let ctx = RecognitionContext::new(&engine).with_forced_size(cli.size.map(|n| n as usize));

    match recognize_from_path(&cli.image, &ctx) {
        Ok(spec) => {
            let json = serde_json::to_string_pretty(&spec).expect("PuzzleSpec always serializes");
            match &cli.output {
                Some(path) => {
                    if let Err(e) = std::fs::write(path, json) {
                        eprintln!("error: could not write output file: {e}");
                        return ExitCode::from(2);
                    }
                }
                None => println!("{json}"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn exit_code_for(error: &MathdokuError) -> u8 {
    match error {
        MathdokuError::Configuration(_) => 1,
        MathdokuError::Io(_) | MathdokuError::ImageDecode(_) => 2,
        MathdokuError::Structural(_) => 3,
    }
}
