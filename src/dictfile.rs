// WB-Dict Dictionary File Model
// Splits a dictionary file into its comment header and tab-separated data rows

use crate::types::DictError;
use std::fs;
use std::path::Path;

/// Line whose trimmed content ends the header block
pub const HEADER_MARKER: &str = "...";

/// One data row of a dictionary file, kept verbatim
#[derive(Debug, Clone)]
pub struct DataLine {
    /// 1-based line number in the original file, for diagnostics
    pub line_no: usize,

    /// Raw line content without its terminator
    pub raw: String,
}

/// A dictionary file split into header and data blocks
///
/// The header is everything up to and including the first line whose trimmed
/// content is exactly `...`; it is preserved verbatim on rewrite. Without a
/// marker the whole file is data.
#[derive(Debug, Clone, Default)]
pub struct DictFile {
    /// Header/comment lines, marker line included
    pub header: Vec<String>,

    /// Data rows, blank lines included
    pub data: Vec<DataLine>,
}

impl DictFile {
    /// Read and parse a dictionary file
    pub fn read(path: &Path) -> Result<Self, DictError> {
        let content = read_file(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse file content into header and data blocks
    pub fn parse(content: &str) -> Self {
        let lines: Vec<&str> = content.lines().collect();

        let marker = lines.iter().position(|line| line.trim() == HEADER_MARKER);

        match marker {
            Some(pos) => Self {
                header: lines[..=pos].iter().map(|s| s.to_string()).collect(),
                data: lines[pos + 1..]
                    .iter()
                    .enumerate()
                    .map(|(i, line)| DataLine {
                        line_no: pos + 2 + i,
                        raw: line.to_string(),
                    })
                    .collect(),
            },
            None => Self {
                header: Vec::new(),
                data: lines
                    .iter()
                    .enumerate()
                    .map(|(i, line)| DataLine {
                        line_no: i + 1,
                        raw: line.to_string(),
                    })
                    .collect(),
            },
        }
    }

    /// Render the file back to text, one `\n` per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.header {
            out.push_str(line);
            out.push('\n');
        }
        for line in &self.data {
            out.push_str(&line.raw);
            out.push('\n');
        }
        out
    }

    /// Iterate over raw data line contents
    pub fn data_lines(&self) -> impl Iterator<Item = &str> {
        self.data.iter().map(|line| line.raw.as_str())
    }
}

/// Read a file to a string with path context on failure
pub fn read_file(path: &Path) -> Result<String, DictError> {
    fs::read_to_string(path).map_err(|source| DictError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a string to a file with path context on failure
pub fn write_file(path: &Path, content: &str) -> Result<(), DictError> {
    fs::write(path, content).map_err(|source| DictError::Write {
        path: path.to_path_buf(),
        source,
    })
}
