// WB-Dict Weight Sync CLI
// Synchronizes the weight column between two dictionary files

use clap::Parser;
use std::path::{Path, PathBuf};
use wb_dict::WeightSync;

/// Weight Sync Tool - Copy phrase weights from one dictionary file into another
#[derive(Parser, Debug)]
#[command(name = "wb-sync")]
#[command(about = "Synchronize the weight column between two dictionary files", long_about = None)]
#[command(version)]
struct Args {
    /// Source file providing the weights
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Target file whose weight column is rewritten
    #[arg(value_name = "TARGET")]
    target: PathBuf,

    /// Directory for timestamped backups and update logs
    #[arg(short, long, default_value = "update_record")]
    record_dir: PathBuf,

    /// Skip writing the human-readable update log
    #[arg(long)]
    no_log: bool,

    /// Show detailed information
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.verbose {
        println!(
            "Synchronizing weights: {} -> {}",
            args.source.display(),
            args.target.display()
        );
    }

    let sync = WeightSync::new(&args.record_dir);
    let report = sync.synchronize(&args.source, &args.target)?;

    println!("Updated {}", args.target.display());
    println!("  Source phrases:  {}", report.source_phrases);
    println!("  Updated lines:   {}", report.updated);
    println!("  Unmatched:       {}", report.unmatched);
    println!("  Errors:          {}", report.errors);
    if args.verbose && report.skipped_source_rows > 0 {
        println!("  Skipped source rows: {}", report.skipped_source_rows);
    }
    println!("  Backup: {}", report.backup_path.display());

    if !args.no_log {
        let source_name = file_name(&args.source);
        let target_name = file_name(&args.target);
        let log_path = report.write_log(&args.record_dir, source_name, target_name)?;
        println!("  Update log: {}", log_path.display());
    }

    Ok(())
}

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("dictionary")
}
