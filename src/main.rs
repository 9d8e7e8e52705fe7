// src/main.rs
mod extractors;
mod reader;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;

use extractors::{Category, JournalExtractor, SectionScope};
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the trademark journal number extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal PDF to process
    input: PathBuf,

    /// Output directory for the extracted number lists
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Reset section tracking at every page boundary instead of carrying
    /// it across the whole document
    #[arg(long)]
    page_scoped_sections: bool,

    /// Debug mode - save annotated per-page scan dumps
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 4. Read the journal pages (fatal if the document itself is unreadable)
    let journal = reader::pdf::read_journal(&args.input)?;
    if journal.summary.page_count == 0 {
        tracing::warn!("Document contains no pages");
    }

    // 5. Debug mode: save annotated scan dumps before extraction
    if args.debug {
        let debug_dir = storage.base_dir().join("debug");
        std::fs::create_dir_all(&debug_dir)?;
        for (index, text) in journal.texts.iter().enumerate() {
            let Some(text) = text else { continue };
            let dump_path = debug_dir.join(format!("page_{:03}.txt", index + 1));
            if let Err(e) = utils::scan_debug::save_scan_dump(text, index + 1, &dump_path) {
                tracing::warn!("Failed to save scan dump for page {}: {}", index + 1, e);
            }
        }
    }

    // 6. Run the extraction engine over every page
    let extractor = if args.page_scoped_sections {
        JournalExtractor::with_scope(SectionScope::Page)
    } else {
        JournalExtractor::new()
    };
    let result = extractor.extract_all(journal.texts.iter().map(|t| t.as_deref()));

    for category in Category::ALL {
        tracing::info!(
            "{}: {} unique numbers",
            category,
            result.numbers(category).len()
        );
    }

    // 7. A readable document with zero matches is its own outcome,
    //    reported distinctly from a decode failure.
    if result.is_empty() {
        return Err(AppError::NoMatches(args.input.display().to_string()));
    }

    // 8. Save the per-category CSVs and the run metadata
    let written = storage.save_results(&result)?;
    storage.save_run_metadata(&journal.summary, &result)?;

    tracing::info!(
        "Processing finished. {} pages with text, {} skipped, {} files written to {}",
        journal.summary.pages_with_text,
        journal.summary.page_count - journal.summary.pages_with_text,
        written.len(),
        args.output_dir
    );

    Ok(())
}
