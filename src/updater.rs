// WB-Dict Dictionary Updater
// Accept/reject decision for new dictionary entries, plus append helpers

use crate::charcodes::CharCodeTable;
use crate::codegen::{extract_cjk, generate, validate_user_code};
use crate::dictfile::{read_file, write_file};
use crate::types::{AddOutcome, DictError, DictionaryEntry, EncodingRule};
use crate::weights::PhraseWeightTable;
use chrono::Local;
use log::debug;
use rustc_hash::FxHashSet;
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Weight assigned to phrases absent from the weight table
pub const DEFAULT_WEIGHT: &str = "100";

/// Decide whether a phrase may be added to the dictionary
///
/// Policy:
/// - a phrase already present is a [`AddOutcome::Duplicate`], not an error;
/// - rules 1-4 reject phrases with no CJK characters or with a CJK
///   character missing from the code table, and otherwise generate the code
///   from the phrase's CJK characters only;
/// - rule 5 requires `user_code` to pass [`validate_user_code`];
/// - the weight comes from the weight table, defaulting to "100".
///
/// Pure decision: nothing is written. The caller appends the returned entry
/// with [`append_entry`] and records `existing` membership itself.
pub fn try_add(
    phrase: &str,
    rule: EncodingRule,
    user_code: Option<&str>,
    table: &CharCodeTable,
    weights: &PhraseWeightTable,
    existing: &FxHashSet<String>,
) -> AddOutcome {
    if existing.contains(phrase) {
        return AddOutcome::Duplicate;
    }

    let code = if rule == EncodingRule::Free {
        match user_code.map(validate_user_code) {
            Some(Ok(code)) => code,
            _ => return AddOutcome::InvalidUserCode,
        }
    } else {
        let cjk = extract_cjk(phrase);
        if cjk.is_empty() {
            return AddOutcome::NoCjkCharacters;
        }
        if cjk.chars().any(|ch| !table.contains(ch)) {
            return AddOutcome::UncodedCharacters;
        }
        generate(&cjk, table, rule)
    };

    let weight = weights.get(phrase).unwrap_or(DEFAULT_WEIGHT).to_string();
    debug!("accepted '{phrase}' -> {code} (weight {weight})");

    AddOutcome::Added(DictionaryEntry::new(phrase.to_string(), code, weight))
}

/// Load the set of phrases already present in a dictionary file
///
/// The first tab-separated cell of each non-blank line is the phrase. A
/// missing file yields an empty set.
pub fn load_existing_phrases(path: &Path) -> Result<FxHashSet<String>, DictError> {
    if !path.exists() {
        return Ok(FxHashSet::default());
    }

    let content = read_file(path)?;
    let mut phrases = FxHashSet::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(phrase) = line.split('\t').next() {
            phrases.insert(phrase.to_string());
        }
    }
    Ok(phrases)
}

/// Append one entry to the dictionary file, creating it if needed
pub fn append_entry(path: &Path, entry: &DictionaryEntry) -> Result<(), DictError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| DictError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    writeln!(file, "{}", entry.to_line()).map_err(|source| DictError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Append rejected phrases to the fail list, one per line
///
/// The file is created if missing; existing contents are kept so repeated
/// runs accumulate instead of overwriting earlier failures.
pub fn append_failed_phrases(path: &Path, phrases: &[String]) -> Result<(), DictError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| DictError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    for phrase in phrases {
        writeln!(file, "{phrase}").map_err(|source| DictError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Summary of one batch encoding run
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Rule the run encoded under
    pub rule: EncodingRule,

    /// Entries accepted and appended to the dictionary
    pub added: Vec<DictionaryEntry>,

    /// Phrases already present in the dictionary
    pub duplicates: usize,

    /// Phrases skipped because an earlier run already recorded them as failed
    pub skipped_failed: usize,

    /// Rejected phrases with the rejection reason
    pub rejected: Vec<(String, String)>,
}

impl BatchReport {
    /// Create an empty report for a run under `rule`
    pub fn new(rule: EncodingRule) -> Self {
        Self {
            rule,
            added: Vec::new(),
            duplicates: 0,
            skipped_failed: 0,
            rejected: Vec::new(),
        }
    }

    /// Write the processing record for this run
    ///
    /// The record lands in `dir` as `{stem}_processed_{timestamp}.txt`,
    /// where `stem` comes from the phrase source file name. It lists the
    /// counts, every accepted entry, and every rejected phrase with its
    /// reason. Returns the record path.
    pub fn write_record(&self, dir: &Path, source: &Path) -> Result<PathBuf, DictError> {
        fs::create_dir_all(dir).map_err(|source| DictError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("phrases");
        let timestamp = Local::now().format("%Y%m%d%H%M%S").to_string();
        let record_path = dir.join(format!("{stem}_processed_{timestamp}.txt"));
        let divider = "-".repeat(40);

        let mut record = String::new();
        record.push_str(&format!("# Batch encoding record - {timestamp}\n"));
        record.push_str(&format!("Source: {}\n", source.display()));
        record.push_str(&format!("Rule: {} ({})\n", self.rule.number(), self.rule));
        record.push_str(&format!("{divider}\n"));
        record.push_str(&format!("Added: {}\n", self.added.len()));
        record.push_str(&format!("Duplicates: {}\n", self.duplicates));
        record.push_str(&format!(
            "Previously failed (skipped): {}\n",
            self.skipped_failed
        ));
        record.push_str(&format!("Rejected: {}\n", self.rejected.len()));

        record.push_str("\n## Accepted entries\n");
        record.push_str(&format!("{divider}\n"));
        if self.added.is_empty() {
            record.push_str("None.\n");
        } else {
            for entry in &self.added {
                record.push_str(&entry.to_line());
                record.push('\n');
            }
        }

        record.push_str("\n## Rejected phrases\n");
        record.push_str(&format!("{divider}\n"));
        if self.rejected.is_empty() {
            record.push_str("None.\n");
        } else {
            for (phrase, reason) in &self.rejected {
                record.push_str(&format!("{phrase}\t{reason}\n"));
            }
        }

        write_file(&record_path, &record)?;
        Ok(record_path)
    }
}

/// Rewrite the dictionary file without blank lines
///
/// A missing file is left alone.
pub fn compact_dictionary(path: &Path) -> Result<(), DictError> {
    if !path.exists() {
        return Ok(());
    }

    let content = read_file(path)?;
    let mut output = String::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        output.push_str(line);
        output.push('\n');
    }
    write_file(path, &output)
}
