//! # WB-Dict: Dictionary Maintenance for Chinese Input Methods
//!
//! Maintains tab-delimited dictionary files (phrase, code, weight columns)
//! for a Chinese input method. Two independent pipelines share the file
//! format but no state:
//!
//! 1. **Weight synchronization** - copies the weight column between two
//!    dictionary files by matching on phrase text, inferring which column
//!    holds phrases, codes, or weights since column order is not guaranteed.
//! 2. **Phrase encoding** - derives a fixed 4-letter structural code for a
//!    multi-character phrase from a single-character code table, under one
//!    of five selectable rules, for appending into a user dictionary.
//!
//! ## Column inference
//!
//! Each cell is classified by shape (pure integer → weight, lowercase
//! letters → code, anything else → phrase) and each column's type is the
//! majority label across all rows, so a minority of malformed or reordered
//! rows cannot destabilize the whole file. Per-row fallbacks rescue rows
//! that disagree with the file-level layout.
//!
//! ## Example Usage
//!
//! ```ignore
//! use wb_dict::{CharCodeTable, EncodingRule, WeightSync};
//!
//! // Synchronize weights between two files
//! let sync = WeightSync::new("update_record");
//! let report = sync.synchronize("phrase_weight.txt".as_ref(), "user.dict.yaml".as_ref())?;
//! println!("{} rows updated", report.updated);
//!
//! // Generate a phrase code
//! let table = CharCodeTable::load("wubi.chars.txt".as_ref())?;
//! let code = wb_dict::generate("你好", &table, EncodingRule::Standard);
//! # Ok::<(), wb_dict::DictError>(())
//! ```
//!
//! ## Architecture
//!
//! - **Column-Type Classifier** - majority-vote column typing over tab-split rows
//! - **Row Resolver** - per-row phrase/weight location with content fallbacks
//! - **Weight Synchronizer** - backup, rewrite, and change report for a target file
//! - **Char Code Table / Phrase Code Generator** - five-rule code derivation
//! - **Dictionary Updater** - accept/reject decision for new entries

pub mod charcodes;
pub mod classifier;
pub mod codegen;
pub mod dictfile;
pub mod resolver;
pub mod sync;
pub mod types;
pub mod updater;
pub mod weights;

// Re-export main types and functions for convenience
pub use charcodes::CharCodeTable;
pub use classifier::{classify_cell, classify_columns, ColumnTypeMap};
pub use codegen::{extract_cjk, generate, validate_user_code};
pub use dictfile::{DataLine, DictFile};
pub use resolver::{resolve_row, validate_row};
pub use sync::{SyncReport, WeightSync};
pub use types::{
    AddOutcome, CellType, DictError, DictionaryEntry, EncodingRule, ResolvedColumns,
};
pub use updater::{
    append_entry, append_failed_phrases, compact_dictionary, load_existing_phrases, try_add,
    BatchReport,
};
pub use weights::PhraseWeightTable;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
