// WB-Dict Single-Character Code Table
// Loads the character → base code reference table

use crate::dictfile::read_file;
use crate::types::DictError;
use rustc_hash::FxHashMap;
use std::path::Path;

/// Immutable mapping from a single character to its base code string
///
/// Loaded once per run from a reference table file with one
/// `character<TAB>code` pair per line.
#[derive(Debug, Clone, Default)]
pub struct CharCodeTable {
    codes: FxHashMap<char, String>,
}

impl CharCodeTable {
    /// Load the table from a file
    ///
    /// Each non-blank line is tab-split; the first cell is the character, the
    /// second its code. Lines with fewer than two cells are ignored, as are
    /// lines whose first cell is not exactly one character. Duplicate
    /// characters: the last occurrence wins.
    pub fn load(path: &Path) -> Result<Self, DictError> {
        let content = read_file(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse table content (see [`CharCodeTable::load`])
    pub fn parse(content: &str) -> Self {
        let mut codes = FxHashMap::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut cells = line.split('\t');
            let (Some(first), Some(code)) = (cells.next(), cells.next()) else {
                continue;
            };

            let mut chars = first.trim().chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                continue;
            };

            codes.insert(ch, code.trim().to_string());
        }

        Self { codes }
    }

    /// Build a table from in-memory pairs (mainly for tests and examples)
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        Self {
            codes: pairs
                .into_iter()
                .map(|(ch, code)| (ch, code.into()))
                .collect(),
        }
    }

    /// Get the base code of a character
    pub fn get(&self, ch: char) -> Option<&str> {
        self.codes.get(&ch).map(|s| s.as_str())
    }

    /// Check whether a character has a code
    pub fn contains(&self, ch: char) -> bool {
        self.codes.contains_key(&ch)
    }

    /// Number of coded characters
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True when the table holds no characters
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let table = CharCodeTable::parse("你\twq\n好\tvb\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get('你'), Some("wq"));
        assert_eq!(table.get('好'), Some("vb"));
        assert_eq!(table.get('中'), None);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let table = CharCodeTable::parse("中\tk\n中\tkhk\n");
        assert_eq!(table.get('中'), Some("khk"));
    }

    #[test]
    fn test_short_lines_ignored() {
        let table = CharCodeTable::parse("你\n\n好\tvb\n");
        assert_eq!(table.len(), 1);
        assert!(table.contains('好'));
    }

    #[test]
    fn test_multi_char_first_cell_ignored() {
        let table = CharCodeTable::parse("你好\twqvb\n中\tkhk\n");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get('中'), Some("khk"));
    }

    #[test]
    fn test_extra_cells_ignored() {
        let table = CharCodeTable::parse("中\tkhk\t100\n");
        assert_eq!(table.get('中'), Some("khk"));
    }

    #[test]
    fn test_empty_table() {
        let table = CharCodeTable::parse("");
        assert!(table.is_empty());
    }
}
