// WB-Dict Column-Type Classifier
// Infers which tab-separated column holds phrases, codes, or weights

use crate::types::CellType;
use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Column index → resolved column type, computed once per file
pub type ColumnTypeMap = FxHashMap<usize, CellType>;

/// Pure-integer pattern: optional leading '-', then decimal digits
pub(crate) fn weight_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?[0-9]+$").unwrap())
}

/// Code pattern: one or more lowercase ASCII letters
pub(crate) fn code_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z]+$").unwrap())
}

/// Check if a character is a CJK ideograph (U+4E00..U+9FFF)
#[inline]
pub fn is_cjk_char(ch: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&ch)
}

/// Check if a string contains at least one CJK ideograph
#[inline]
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_char)
}

/// Classify a single cell by its content shape
///
/// Order matters: a pure integer is a weight even though it is also valid
/// phrase content, and lowercase letters are a code before they are a phrase.
///
/// # Examples
/// ```
/// # use wb_dict::classifier::classify_cell;
/// # use wb_dict::types::CellType;
/// assert_eq!(classify_cell("100"), CellType::Weight);
/// assert_eq!(classify_cell("-5"), CellType::Weight);
/// assert_eq!(classify_cell("wqvb"), CellType::Code);
/// assert_eq!(classify_cell("你好"), CellType::Phrase);
/// assert_eq!(classify_cell("  "), CellType::Unknown);
/// ```
pub fn classify_cell(cell: &str) -> CellType {
    let cell = cell.trim();

    if cell.is_empty() {
        CellType::Unknown
    } else if weight_pattern().is_match(cell) {
        CellType::Weight
    } else if code_pattern().is_match(cell) {
        CellType::Code
    } else {
        CellType::Phrase
    }
}

/// Per-column tallies of cell classifications
#[derive(Debug, Default, Clone, Copy)]
struct ColumnStats {
    total: u32,
    phrase: u32,
    code: u32,
    weight: u32,
}

impl ColumnStats {
    fn record(&mut self, cell_type: CellType) {
        self.total += 1;
        match cell_type {
            CellType::Phrase => self.phrase += 1,
            CellType::Code => self.code += 1,
            CellType::Weight => self.weight += 1,
            CellType::Unknown => {}
        }
    }

    /// Winning label in fixed priority order phrase > code > weight,
    /// provided it covers at least half of all occurrences
    fn resolve(&self) -> Option<CellType> {
        // Columns that were empty on every row get no entry at all
        let candidates = [
            (CellType::Phrase, self.phrase),
            (CellType::Code, self.code),
            (CellType::Weight, self.weight),
        ];
        let best_count = candidates.iter().map(|&(_, count)| count).max().unwrap();
        if best_count == 0 {
            return None;
        }
        let best_type = candidates
            .into_iter()
            .find(|&(_, count)| count == best_count)
            .unwrap()
            .0;

        if best_count * 2 >= self.total {
            Some(best_type)
        } else {
            Some(CellType::Unknown)
        }
    }
}

/// Classify every column of a file by majority vote across its data rows
///
/// Each row is split on tab and every cell classified with [`classify_cell`];
/// per column index, the most frequent label among phrase/code/weight wins
/// (ties broken in that fixed priority order) when it covers at least 50% of
/// the column's occurrences, otherwise the column is `Unknown`. Blank lines
/// are skipped. The vote tolerates a minority of malformed or reordered rows.
///
/// Pure function: no state is kept between calls.
///
/// # Examples
/// ```
/// # use wb_dict::classifier::classify_columns;
/// # use wb_dict::types::CellType;
/// let rows = ["你好\twqvb\t100", "谢谢\tabcd\t50"];
/// let types = classify_columns(rows);
/// assert_eq!(types.get(&0), Some(&CellType::Phrase));
/// assert_eq!(types.get(&1), Some(&CellType::Code));
/// assert_eq!(types.get(&2), Some(&CellType::Weight));
/// ```
pub fn classify_columns<I>(rows: I) -> ColumnTypeMap
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut stats: FxHashMap<usize, ColumnStats> = FxHashMap::default();

    for row in rows {
        let row = row.as_ref();
        if row.trim().is_empty() {
            continue;
        }

        for (idx, cell) in row.split('\t').enumerate() {
            stats.entry(idx).or_default().record(classify_cell(cell));
        }
    }

    let mut column_types = ColumnTypeMap::default();
    for (idx, column) in stats {
        if let Some(cell_type) = column.resolve() {
            column_types.insert(idx, cell_type);
        }
    }

    column_types
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============ Cell Classification Tests ============

    #[test]
    fn test_weight_cells() {
        assert_eq!(classify_cell("0"), CellType::Weight);
        assert_eq!(classify_cell("12345"), CellType::Weight);
        assert_eq!(classify_cell("-42"), CellType::Weight);
        assert_eq!(classify_cell(" 100 "), CellType::Weight);
    }

    #[test]
    fn test_code_cells() {
        assert_eq!(classify_cell("a"), CellType::Code);
        assert_eq!(classify_cell("wqvb"), CellType::Code);
        assert_eq!(classify_cell("nihao"), CellType::Code);
    }

    #[test]
    fn test_phrase_cells() {
        assert_eq!(classify_cell("你好"), CellType::Phrase);
        assert_eq!(classify_cell("3D打印"), CellType::Phrase);
        assert_eq!(classify_cell("Wi-Fi"), CellType::Phrase);
        // Uppercase letters are not a code
        assert_eq!(classify_cell("ABC"), CellType::Phrase);
        // Mixed digits and letters are not a weight
        assert_eq!(classify_cell("12a"), CellType::Phrase);
        // A bare '-' is not a weight
        assert_eq!(classify_cell("-"), CellType::Phrase);
    }

    #[test]
    fn test_empty_cells() {
        assert_eq!(classify_cell(""), CellType::Unknown);
        assert_eq!(classify_cell("   "), CellType::Unknown);
        assert_eq!(classify_cell("\t"), CellType::Unknown);
    }

    // ============ Majority Vote Tests ============

    #[test]
    fn test_clean_file() {
        let rows = ["你好\twqvb\t100", "世界\tabcd\t200", "谢谢\txie\t-3"];
        let types = classify_columns(rows);
        assert_eq!(types.get(&0), Some(&CellType::Phrase));
        assert_eq!(types.get(&1), Some(&CellType::Code));
        assert_eq!(types.get(&2), Some(&CellType::Weight));
    }

    #[test]
    fn test_reordered_columns() {
        let rows = ["100\t你好", "200\t世界"];
        let types = classify_columns(rows);
        assert_eq!(types.get(&0), Some(&CellType::Weight));
        assert_eq!(types.get(&1), Some(&CellType::Phrase));
    }

    #[test]
    fn test_minority_rows_do_not_flip_column() {
        // One row out of four has phrase and weight swapped
        let rows = ["你好\t100", "世界\t200", "100\t谢谢", "再见\t50"];
        let types = classify_columns(rows);
        assert_eq!(types.get(&0), Some(&CellType::Phrase));
        assert_eq!(types.get(&1), Some(&CellType::Weight));
    }

    #[test]
    fn test_all_integer_column_is_weight() {
        let rows = ["你好\t1", "世界\t22", "谢谢\t-333"];
        let types = classify_columns(rows);
        assert_eq!(types.get(&1), Some(&CellType::Weight));
    }

    #[test]
    fn test_no_majority_is_unknown() {
        // Four rows, no label reaches 50% in column 1:
        // weight, code, phrase, unknown → each at 25%
        let rows = ["a\t100", "b\tcd", "c\t你好", "d\t"];
        let types = classify_columns(rows);
        assert_eq!(types.get(&1), Some(&CellType::Unknown));
    }

    #[test]
    fn test_exactly_half_is_enough() {
        let rows = ["你好\t100", "世界\t200", "abcd\tef", "ghij\tkl"];
        let types = classify_columns(rows);
        // Column 0: 2 phrase / 2 code → tie, phrase wins by priority
        assert_eq!(types.get(&0), Some(&CellType::Phrase));
        // Column 1: 2 weight / 2 code → tie at 50%, code outranks weight
        assert_eq!(types.get(&1), Some(&CellType::Code));
    }

    #[test]
    fn test_always_empty_column_absent() {
        let rows = ["你好\t\t100", "世界\t\t200"];
        let types = classify_columns(rows);
        assert_eq!(types.get(&0), Some(&CellType::Phrase));
        assert!(!types.contains_key(&1));
        assert_eq!(types.get(&2), Some(&CellType::Weight));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let rows = ["你好\t100", "", "   ", "世界\t200"];
        let types = classify_columns(rows);
        assert_eq!(types.get(&0), Some(&CellType::Phrase));
        assert_eq!(types.get(&1), Some(&CellType::Weight));
    }

    #[test]
    fn test_empty_input() {
        let types = classify_columns(Vec::<String>::new());
        assert!(types.is_empty());
    }

    #[test]
    fn test_ragged_rows() {
        // A third column present in only one row still gets classified
        let rows = ["你好\t100", "世界\t200\tabc"];
        let types = classify_columns(rows);
        assert_eq!(types.get(&2), Some(&CellType::Code));
    }

    // ============ CJK Helper Tests ============

    #[test]
    fn test_cjk_detection() {
        assert!(is_cjk_char('中'));
        assert!(is_cjk_char('一'));
        assert!(!is_cjk_char('a'));
        assert!(!is_cjk_char('。'));
        assert!(contains_cjk("3D打印"));
        assert!(!contains_cjk("hello 123"));
    }
}
