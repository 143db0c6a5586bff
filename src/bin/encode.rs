// WB-Dict Batch Encoder CLI
// Encodes phrases from a file and appends new entries to the user dictionary

use clap::Parser;
use rustc_hash::FxHashSet;
use std::fs;
use std::path::PathBuf;
use wb_dict::{
    append_entry, append_failed_phrases, compact_dictionary, load_existing_phrases, try_add,
    AddOutcome, BatchReport, CharCodeTable, EncodingRule, PhraseWeightTable,
};

/// Batch Encoder - Generate codes for phrases and grow the user dictionary
#[derive(Parser, Debug)]
#[command(name = "wb-encode")]
#[command(about = "Encode phrases from a file into the user dictionary", long_about = None)]
#[command(version)]
struct Args {
    /// File with one phrase per line
    #[arg(value_name = "PHRASES")]
    phrases: PathBuf,

    /// Single-character code table (character<TAB>code per line)
    #[arg(short, long)]
    table: PathBuf,

    /// Optional phrase weight table (phrase<TAB>weight per line)
    #[arg(short, long)]
    weights: Option<PathBuf>,

    /// User dictionary to append accepted entries to
    #[arg(short, long)]
    dict: PathBuf,

    /// Encoding rule 1-4 (rule 5 needs per-phrase user codes and is not
    /// supported in batch mode)
    #[arg(short, long, default_value = "1")]
    rule: u8,

    /// File to collect rejected phrases, one per line; phrases already
    /// listed there are skipped on later runs
    #[arg(long)]
    fail_file: Option<PathBuf>,

    /// Directory for the timestamped processing record
    #[arg(long)]
    record_dir: Option<PathBuf>,

    /// Show every accepted entry
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let rule = EncodingRule::try_from(args.rule)?;
    if rule == EncodingRule::Free {
        return Err("rule 5 (free coding) requires a user code per phrase and cannot run in batch mode".into());
    }

    let table = CharCodeTable::load(&args.table)?;
    let weights = match &args.weights {
        Some(path) => PhraseWeightTable::load(path)?,
        None => PhraseWeightTable::new(),
    };
    let mut existing = load_existing_phrases(&args.dict)?;

    // Phrases an earlier run already recorded as failed are not retried
    let failed_before = match &args.fail_file {
        Some(path) => load_existing_phrases(path)?,
        None => FxHashSet::default(),
    };

    if args.verbose {
        println!(
            "Code table: {} characters; weight table: {} phrases; dictionary: {} entries",
            table.len(),
            weights.len(),
            existing.len()
        );
    }

    let input = fs::read_to_string(&args.phrases)?;
    let mut report = BatchReport::new(rule);

    for line in input.lines() {
        let phrase = line.trim();
        if phrase.is_empty() {
            continue;
        }

        if failed_before.contains(phrase) {
            report.skipped_failed += 1;
            continue;
        }

        match try_add(phrase, rule, None, &table, &weights, &existing) {
            AddOutcome::Added(entry) => {
                append_entry(&args.dict, &entry)?;
                existing.insert(entry.phrase.clone());
                if args.verbose {
                    println!("  + {} -> {} ({})", entry.phrase, entry.code, entry.weight);
                }
                report.added.push(entry);
            }
            AddOutcome::Duplicate => {
                report.duplicates += 1;
            }
            outcome => {
                if args.verbose {
                    println!("  ! {phrase}: {outcome}");
                }
                report.rejected.push((phrase.to_string(), outcome.to_string()));
            }
        }
    }

    if !report.added.is_empty() {
        compact_dictionary(&args.dict)?;
    }

    if let Some(fail_path) = &args.fail_file {
        if !report.rejected.is_empty() {
            let newly_failed: Vec<String> = report
                .rejected
                .iter()
                .map(|(phrase, _)| phrase.clone())
                .collect();
            append_failed_phrases(fail_path, &newly_failed)?;
        }
    }

    println!("Rule {} ({})", rule.number(), rule);
    println!("  Added:      {}", report.added.len());
    println!("  Duplicates: {}", report.duplicates);
    println!("  Rejected:   {}", report.rejected.len());
    if report.skipped_failed > 0 {
        println!("  Skipped (previously failed): {}", report.skipped_failed);
    }

    if let Some(dir) = &args.record_dir {
        let record_path = report.write_record(dir, &args.phrases)?;
        println!("  Processing record: {}", record_path.display());
    }

    Ok(())
}
