// WB-Dict Weight Synchronizer
// Rewrites a target file's weight column from a source file's phrase weights

use crate::classifier::classify_columns;
use crate::dictfile::{read_file, write_file, DictFile};
use crate::resolver::{resolve_row, validate_row};
use crate::types::DictError;
use crate::weights::PhraseWeightTable;
use chrono::Local;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of one synchronization run
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Rows whose weight cell was replaced
    pub updated: usize,

    /// Rows whose phrase has no entry in the source table
    pub unmatched: usize,

    /// Rows whose phrase or weight column could not be resolved
    pub errors: usize,

    /// Source rows skipped while building the weight table
    pub skipped_source_rows: usize,

    /// Phrases loaded from the source file
    pub source_phrases: usize,

    /// Original (pre-change) content of every modified line
    pub changed_lines: Vec<String>,

    /// Where the pre-modification target content was copied
    pub backup_path: PathBuf,

    /// Full pre-modification target content
    pub original_content: String,

    /// Timestamp shared by the backup and log file names
    pub timestamp: String,
}

impl SyncReport {
    /// Write the human-readable update log
    ///
    /// Three sections: the counts summary, the original content of every
    /// modified line, and the backup reference with the full pre-change
    /// file content. Returns the log file path.
    pub fn write_log(
        &self,
        dir: &Path,
        source_name: &str,
        target_name: &str,
    ) -> Result<PathBuf, DictError> {
        fs::create_dir_all(dir).map_err(|source| DictError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let log_path = dir.join(format!("sync_log_{}.txt", self.timestamp));
        let divider = "*".repeat(30);
        let rule = "-".repeat(40);

        let mut log = String::new();
        log.push_str(&format!("# Weight update log - {}\n", self.timestamp));
        log.push_str(&format!("{divider}\n\n"));

        log.push_str(&format!("## File: {target_name}\n"));
        log.push_str(&format!("{rule}\n"));
        log.push_str(&format!("Updated lines: {}\n", self.updated));
        log.push_str(&format!("Unmatched phrases: {}\n", self.unmatched));
        log.push_str(&format!("Processing errors: {}\n", self.errors));
        log.push_str(&format!("Source file: {source_name}\n"));
        log.push_str(&format!("\n{divider}\n\n"));

        log.push_str("## Modified lines (original content)\n");
        log.push_str(&format!("{rule}\n"));
        if self.changed_lines.is_empty() {
            log.push_str("No lines were modified.\n");
        } else {
            log.push_str(&format!("{} lines modified:\n\n", self.changed_lines.len()));
            for line in &self.changed_lines {
                log.push_str(line);
                log.push('\n');
            }
        }
        log.push_str(&format!("\n{divider}\n\n"));

        log.push_str("## Backup of the original file\n");
        log.push_str(&format!("{rule}\n"));
        log.push_str(&format!("Backup path: {}\n\n", self.backup_path.display()));
        log.push_str("Original content:\n");
        log.push_str(&format!("{rule}\n"));
        log.push_str(&self.original_content);

        write_file(&log_path, &log)?;
        Ok(log_path)
    }
}

/// Weight synchronizer
///
/// Loads a source and a target dictionary file, infers each file's column
/// layout independently, and rewrites the target's weight cells from the
/// source's phrase → weight table. The target is backed up before any write.
pub struct WeightSync {
    /// Directory for timestamped backups
    record_dir: PathBuf,
}

impl WeightSync {
    /// Create a synchronizer writing backups into `record_dir`
    pub fn new(record_dir: impl Into<PathBuf>) -> Self {
        Self {
            record_dir: record_dir.into(),
        }
    }

    /// Synchronize weights from `source` into `target`
    ///
    /// Steps:
    /// 1. Load the source file, classify its columns and build its phrase →
    ///    weight table (skipping unresolvable rows).
    /// 2. Load the target file with its own independent column map.
    /// 3. For each target data row, resolve its phrase/weight columns and
    ///    substitute the source weight when the phrase matches and the
    ///    weight string differs. Unmatched and unresolvable rows pass
    ///    through unchanged and are counted.
    /// 4. Copy the pre-modification target content to a timestamped backup.
    /// 5. Rewrite the target: header verbatim, then every data row in
    ///    original order, tab-joined.
    ///
    /// A row whose weight cell already equals the source value is not
    /// counted as changed. Any file-level read, backup, or write failure
    /// aborts with the target untouched up to that point.
    pub fn synchronize(&self, source: &Path, target: &Path) -> Result<SyncReport, DictError> {
        // Step 1: source weight table
        let source_file = DictFile::read(source)?;
        let source_types = classify_columns(source_file.data_lines());
        debug!("source column types: {source_types:?}");
        let (source_weights, skipped_source_rows) =
            PhraseWeightTable::from_dict(&source_file, &source_types);
        info!(
            "loaded {} phrases from {} ({} rows skipped)",
            source_weights.len(),
            source.display(),
            skipped_source_rows
        );

        // Step 2: target file with its own column map
        let original_content = read_file(target)?;
        let target_file = DictFile::parse(&original_content);
        let target_types = classify_columns(target_file.data_lines());
        debug!("target column types: {target_types:?}");

        // Step 3: rewrite rows in memory
        let mut out_lines: Vec<String> = Vec::with_capacity(target_file.data.len());
        let mut updated = 0;
        let mut unmatched = 0;
        let mut errors = 0;
        let mut changed_lines = Vec::new();

        for line in &target_file.data {
            if line.raw.trim().is_empty() {
                out_lines.push(line.raw.clone());
                continue;
            }

            if !line.raw.contains('\t') {
                warn!("line {}: no tab separator, passed through", line.line_no);
                out_lines.push(line.raw.clone());
                errors += 1;
                continue;
            }

            let cells: Vec<&str> = line.raw.split('\t').collect();
            if cells.len() < 2 {
                warn!(
                    "line {}: fewer than two columns, passed through",
                    line.line_no
                );
                out_lines.push(line.raw.clone());
                errors += 1;
                continue;
            }

            for warning in validate_row(&cells, &target_types) {
                warn!("line {}: {}", line.line_no, warning);
            }

            let resolved = resolve_row(&cells, &target_types);
            let (Some(phrase_col), Some(weight_col)) = (resolved.phrase, resolved.weight) else {
                warn!(
                    "line {}: phrase or weight column not found, passed through",
                    line.line_no
                );
                out_lines.push(line.raw.clone());
                errors += 1;
                continue;
            };

            let phrase = cells[phrase_col].trim();
            let current_weight = cells[weight_col].trim();

            match source_weights.get(phrase) {
                Some(new_weight) if new_weight == current_weight => {
                    // Already in sync, not a change
                    out_lines.push(line.raw.clone());
                }
                Some(new_weight) => {
                    let mut parts: Vec<&str> = cells.clone();
                    parts[weight_col] = new_weight;
                    out_lines.push(parts.join("\t"));
                    changed_lines.push(line.raw.clone());
                    updated += 1;
                }
                None => {
                    out_lines.push(line.raw.clone());
                    unmatched += 1;
                }
            }
        }

        // Step 4: backup before touching the target
        let timestamp = Local::now().format("%Y%m%d%H%M%S").to_string();
        let backup_path = self.backup_path_for(target, &timestamp);
        fs::create_dir_all(&self.record_dir).map_err(|source| DictError::Backup {
            path: self.record_dir.clone(),
            source,
        })?;
        fs::write(&backup_path, &original_content).map_err(|source| DictError::Backup {
            path: backup_path.clone(),
            source,
        })?;

        // Step 5: rewrite the target
        let mut output = String::new();
        for line in &target_file.header {
            output.push_str(line);
            output.push('\n');
        }
        for line in &out_lines {
            output.push_str(line);
            output.push('\n');
        }
        write_file(target, &output)?;

        info!(
            "synchronized {}: {} updated, {} unmatched, {} errors",
            target.display(),
            updated,
            unmatched,
            errors
        );

        Ok(SyncReport {
            updated,
            unmatched,
            errors,
            skipped_source_rows,
            source_phrases: source_weights.len(),
            changed_lines,
            backup_path,
            original_content,
            timestamp,
        })
    }

    fn backup_path_for(&self, target: &Path, timestamp: &str) -> PathBuf {
        let stem = target
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("target");
        self.record_dir
            .join(format!("{stem}_backup_{timestamp}.txt"))
    }
}
