// WB-Dict Phrase Weight Table
// Phrase → weight mapping with the larger-weight duplicate policy

use crate::classifier::ColumnTypeMap;
use crate::dictfile::{read_file, DictFile};
use crate::resolver::{resolve_row, validate_row};
use crate::types::DictError;
use log::warn;
use rustc_hash::FxHashMap;
use std::path::Path;

/// Phrase → weight string mapping
///
/// Weights stay in string form; numbers are only parsed to decide which of
/// two duplicate entries wins.
#[derive(Debug, Clone, Default)]
pub struct PhraseWeightTable {
    weights: FxHashMap<String, String>,
}

impl PhraseWeightTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a plain two-column `phrase<TAB>weight` table
    ///
    /// Lines with fewer than two cells are ignored. Duplicate phrases keep
    /// the numerically larger weight (see [`PhraseWeightTable::insert_max`]).
    pub fn load(path: &Path) -> Result<Self, DictError> {
        let content = read_file(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse two-column table content (see [`PhraseWeightTable::load`])
    pub fn parse(content: &str) -> Self {
        let mut table = Self::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut cells = line.split('\t');
            let (Some(phrase), Some(weight)) = (cells.next(), cells.next()) else {
                continue;
            };

            table.insert_max(phrase.trim(), weight.trim());
        }

        table
    }

    /// Build a weight table from a parsed dictionary file
    ///
    /// Resolves each row's phrase and weight column through the file-level
    /// column types (with all resolver fallbacks). Rows with fewer than two
    /// cells, unresolvable columns, or an empty phrase or weight cell are
    /// skipped with a diagnostic. Returns the table and the skip count.
    pub fn from_dict(file: &DictFile, column_types: &ColumnTypeMap) -> (Self, usize) {
        let mut table = Self::new();
        let mut skipped = 0;

        for line in &file.data {
            if line.raw.trim().is_empty() {
                continue;
            }

            let cells: Vec<&str> = line.raw.split('\t').collect();
            if cells.len() < 2 {
                warn!("line {}: fewer than two columns, skipped", line.line_no);
                skipped += 1;
                continue;
            }

            for warning in validate_row(&cells, column_types) {
                warn!("line {}: {}", line.line_no, warning);
            }

            let resolved = resolve_row(&cells, column_types);
            let (Some(phrase_col), Some(weight_col)) = (resolved.phrase, resolved.weight) else {
                warn!(
                    "line {}: phrase or weight column not found, skipped",
                    line.line_no
                );
                skipped += 1;
                continue;
            };

            let phrase = cells[phrase_col].trim();
            let weight = cells[weight_col].trim();

            if phrase.is_empty() {
                warn!("line {}: empty phrase cell, skipped", line.line_no);
                skipped += 1;
                continue;
            }
            if weight.is_empty() {
                warn!("line {}: empty weight cell, skipped", line.line_no);
                skipped += 1;
                continue;
            }

            table.insert_max(phrase, weight);
        }

        (table, skipped)
    }

    /// Insert a phrase keeping the numerically larger weight
    ///
    /// A weight that does not parse as an integer compares as 0 but is
    /// stored verbatim if it wins. An existing unparseable value is replaced
    /// by the incoming one. Ties keep the first-seen value.
    pub fn insert_max(&mut self, phrase: &str, weight: &str) {
        let incoming = weight.parse::<i64>().unwrap_or_else(|_| {
            warn!("weight '{weight}' for '{phrase}' is not an integer, comparing as 0");
            0
        });

        match self.weights.get(phrase) {
            None => {
                self.weights.insert(phrase.to_string(), weight.to_string());
            }
            Some(existing) => match existing.parse::<i64>() {
                Ok(current) if incoming > current => {
                    self.weights.insert(phrase.to_string(), weight.to_string());
                }
                Ok(_) => {}
                Err(_) => {
                    self.weights.insert(phrase.to_string(), weight.to_string());
                }
            },
        }
    }

    /// Look up a phrase's weight
    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.weights.get(phrase).map(|s| s.as_str())
    }

    /// Number of phrases in the table
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True when the table holds no phrases
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
