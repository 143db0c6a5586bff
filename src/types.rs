// WB-Dict Type Definitions
// Core types for column classification, weight synchronization, and dictionary updates

use std::path::PathBuf;
use thiserror::Error;

/// Inferred role of a tab-separated cell or column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    /// Phrase text: any non-empty content that is neither a weight nor a code
    /// Example: "你好", "3D打印", "Wi-Fi路由器"
    Phrase,

    /// Structural/phonetic code: one or more lowercase ASCII letters
    /// Example: "wqvb", "nihao"
    Code,

    /// Weight: an optional leading '-' followed by decimal digits
    /// Example: "100", "-5", "0"
    Weight,

    /// Empty or whitespace-only cell, or a column with no stable majority
    Unknown,
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellType::Phrase => write!(f, "phrase"),
            CellType::Code => write!(f, "code"),
            CellType::Weight => write!(f, "weight"),
            CellType::Unknown => write!(f, "unknown"),
        }
    }
}

/// The five phrase encoding rules
///
/// Rules 1-4 derive a 4-letter code from the per-character code table.
/// Rule 5 takes the code verbatim from the user instead of generating one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingRule {
    /// Rule 1: two chars take two codes each; three chars take 1+1+2;
    /// four chars take first codes; five or more take first three + last
    Standard,

    /// Rule 2: like rule 1 up to three chars; four or more chars take the
    /// first code of every char, truncated to 4
    OnePerChar,

    /// Rule 3: first two chars take two codes each, every later char one code,
    /// truncated to 4
    TwoThenOne,

    /// Rule 4: every char contributes its first two codes until 4 letters are
    /// collected, right-padded with 'x'
    AllTwoCodes,

    /// Rule 5: no automatic generation; the code is supplied by the user
    Free,
}

impl EncodingRule {
    /// Rule number as presented to users (1-5)
    pub fn number(&self) -> u8 {
        match self {
            EncodingRule::Standard => 1,
            EncodingRule::OnePerChar => 2,
            EncodingRule::TwoThenOne => 3,
            EncodingRule::AllTwoCodes => 4,
            EncodingRule::Free => 5,
        }
    }
}

impl TryFrom<u8> for EncodingRule {
    type Error = DictError;

    fn try_from(rule: u8) -> Result<Self, DictError> {
        match rule {
            1 => Ok(EncodingRule::Standard),
            2 => Ok(EncodingRule::OnePerChar),
            3 => Ok(EncodingRule::TwoThenOne),
            4 => Ok(EncodingRule::AllTwoCodes),
            5 => Ok(EncodingRule::Free),
            other => Err(DictError::UnknownRule { rule: other }),
        }
    }
}

impl std::fmt::Display for EncodingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingRule::Standard => write!(f, "Standard"),
            EncodingRule::OnePerChar => write!(f, "OnePerChar"),
            EncodingRule::TwoThenOne => write!(f, "TwoThenOne"),
            EncodingRule::AllTwoCodes => write!(f, "AllTwoCodes"),
            EncodingRule::Free => write!(f, "Free"),
        }
    }
}

/// Phrase and weight column positions resolved for a single row
///
/// `None` means the column could not be determined even after all fallbacks;
/// the caller skips the row with a diagnostic instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    /// Index of the phrase column, if found
    pub phrase: Option<usize>,

    /// Index of the weight column, if found
    pub weight: Option<usize>,
}

impl ResolvedColumns {
    /// Both columns were found
    pub fn is_complete(&self) -> bool {
        self.phrase.is_some() && self.weight.is_some()
    }
}

/// One dictionary line: phrase, code, weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Phrase text as entered (may contain non-CJK characters)
    pub phrase: String,

    /// Generated or user-supplied code
    pub code: String,

    /// Weight string (integer form)
    pub weight: String,
}

impl DictionaryEntry {
    /// Create a new entry
    pub fn new(phrase: String, code: String, weight: String) -> Self {
        Self {
            phrase,
            code,
            weight,
        }
    }

    /// Serialize as one tab-joined dictionary line (no trailing newline)
    pub fn to_line(&self) -> String {
        format!("{}\t{}\t{}", self.phrase, self.code, self.weight)
    }
}

/// Outcome of a dictionary addition attempt
///
/// Rejections are structured outcomes, not errors: the caller reports them
/// and moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Accepted; the entry is ready to be appended
    Added(DictionaryEntry),

    /// The phrase is already present in the dictionary
    Duplicate,

    /// A CJK character in the phrase has no entry in the code table (rules 1-4)
    UncodedCharacters,

    /// The phrase contains no CJK characters at all (rules 1-4)
    NoCjkCharacters,

    /// Rule 5 was selected but the supplied code is missing or invalid
    InvalidUserCode,
}

impl std::fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddOutcome::Added(entry) => write!(f, "added ({})", entry.code),
            AddOutcome::Duplicate => write!(f, "already present"),
            AddOutcome::UncodedCharacters => write!(f, "contains uncoded characters"),
            AddOutcome::NoCjkCharacters => write!(f, "contains no CJK characters"),
            AddOutcome::InvalidUserCode => write!(f, "missing or invalid user code"),
        }
    }
}

/// Dictionary processing errors
///
/// Only file-level failures surface here; row-level problems are recovered
/// locally and reported through counters.
#[derive(Debug, Error)]
pub enum DictError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to back up to {path}: {source}")]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("user code must not be empty")]
    EmptyUserCode,

    #[error("user code '{code}' is invalid: only ASCII letters allowed")]
    InvalidUserCode { code: String },

    #[error("unknown encoding rule {rule}: expected 1-5")]
    UnknownRule { rule: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_type_display() {
        assert_eq!(CellType::Phrase.to_string(), "phrase");
        assert_eq!(CellType::Weight.to_string(), "weight");
        assert_eq!(CellType::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_rule_from_number() {
        assert_eq!(EncodingRule::try_from(1).unwrap(), EncodingRule::Standard);
        assert_eq!(EncodingRule::try_from(4).unwrap(), EncodingRule::AllTwoCodes);
        assert_eq!(EncodingRule::try_from(5).unwrap(), EncodingRule::Free);
        assert!(matches!(
            EncodingRule::try_from(6),
            Err(DictError::UnknownRule { rule: 6 })
        ));
    }

    #[test]
    fn test_rule_number_round_trip() {
        for n in 1..=5u8 {
            assert_eq!(EncodingRule::try_from(n).unwrap().number(), n);
        }
    }

    #[test]
    fn test_entry_to_line() {
        let entry = DictionaryEntry::new("你好".into(), "wqvb".into(), "100".into());
        assert_eq!(entry.to_line(), "你好\twqvb\t100");
    }

    #[test]
    fn test_resolved_columns_complete() {
        let both = ResolvedColumns {
            phrase: Some(0),
            weight: Some(2),
        };
        assert!(both.is_complete());
        assert!(!ResolvedColumns::default().is_complete());
    }
}
