// WB-Dict Row Resolver
// Locates the phrase and weight columns of a single row, with fallbacks

use crate::classifier::{classify_cell, code_pattern, contains_cjk, weight_pattern, ColumnTypeMap};
use crate::types::{CellType, ResolvedColumns};

/// Resolve the phrase and weight column of one row
///
/// Three stages, each only filling positions still missing:
/// 1. Lowest index labeled `Phrase` / `Weight` in the file-level map
///    (indices past the end of this row are ignored).
/// 2. Reclassify this row's cells alone and take the first match; this is
///    what rescues rows whose columns are ordered differently from the rest
///    of the file.
/// 3. Content heuristics: first cell containing a CJK ideograph is the
///    phrase, first pure-integer cell is the weight.
///
/// Never fails; a column that stays unresolved is `None` and the caller
/// skips the row with a diagnostic.
pub fn resolve_row(cells: &[&str], column_types: &ColumnTypeMap) -> ResolvedColumns {
    let mut resolved = ResolvedColumns::default();

    // Stage 1: file-level column types
    for idx in 0..cells.len() {
        match column_types.get(&idx) {
            Some(CellType::Phrase) if resolved.phrase.is_none() => resolved.phrase = Some(idx),
            Some(CellType::Weight) if resolved.weight.is_none() => resolved.weight = Some(idx),
            _ => {}
        }
    }

    // Stage 2: per-row reclassification
    if !resolved.is_complete() {
        for (idx, cell) in cells.iter().enumerate() {
            match classify_cell(cell) {
                CellType::Phrase if resolved.phrase.is_none() => resolved.phrase = Some(idx),
                CellType::Weight if resolved.weight.is_none() => resolved.weight = Some(idx),
                _ => {}
            }
        }
    }

    // Stage 3: last-resort content heuristics
    if resolved.phrase.is_none() {
        resolved.phrase = cells
            .iter()
            .position(|cell| contains_cjk(cell.trim()));
    }
    if resolved.weight.is_none() {
        resolved.weight = cells
            .iter()
            .position(|cell| weight_pattern().is_match(cell.trim()));
    }

    resolved
}

/// Check a row's cells against the file-level column types
///
/// Returns one warning per mismatch (weight column not an integer, code
/// column not lowercase letters, expected column empty or missing). Callers
/// log these and keep going; a mismatch often just means the row's columns
/// are reordered and the resolver fallbacks will still find them.
pub fn validate_row(cells: &[&str], column_types: &ColumnTypeMap) -> Vec<String> {
    let mut warnings = Vec::new();

    let mut indices: Vec<(&usize, &CellType)> = column_types.iter().collect();
    indices.sort_by_key(|(idx, _)| **idx);

    for (&idx, &col_type) in indices {
        let Some(cell) = cells.get(idx) else {
            warnings.push(format!("column {idx} missing"));
            continue;
        };
        let cell = cell.trim();

        if cell.is_empty() {
            warnings.push(format!("{col_type} column {idx} is empty"));
            continue;
        }

        match col_type {
            CellType::Weight if !weight_pattern().is_match(cell) => {
                warnings.push(format!("weight column {idx} is not an integer: '{cell}'"));
            }
            CellType::Code if !code_pattern().is_match(cell) => {
                warnings.push(format!(
                    "code column {idx} is not lowercase letters: '{cell}'"
                ));
            }
            _ => {}
        }
    }

    warnings
}
