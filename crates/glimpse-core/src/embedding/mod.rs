//! Pre-trained word embeddings (GloVe-style text tables).
//!
//! The table is loaded once at startup into a single flat row-major matrix
//! with a term → row index, and is read-only afterwards.
//!
//! # Usage
//!
//! ```rust,ignore
//! use glimpse_core::embedding::EmbeddingTable;
//!
//! let table = EmbeddingTable::load(Path::new("glove.6B.300d.txt"))?;
//! let cat = table.get("cat"); // Option<&[f32]> with table.dim() elements
//! ```

mod parse;

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{LoadError, LoadResult};

use self::parse::{parse_line, ParsedLine};

/// Source label used in errors for tables built in memory.
const IN_MEMORY_SOURCE: &str = "<memory>";

/// Term → embedding lookup backed by one flat matrix.
///
/// Stores N × dim floats row-major so that rows can be handed out as slices
/// without per-term allocations.
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
    matrix: Vec<f32>,
    embedding_dim: usize,
    rows: HashMap<String, usize>,
    terms: Vec<String>,
}

impl EmbeddingTable {
    /// Load a whitespace-delimited embedding table from disk.
    ///
    /// Each line is a term followed by its components. Lines whose first
    /// character is whitespace (including blank lines) are skipped. The first
    /// parsed line fixes the dimensionality for the whole table; any later
    /// mismatch, unparseable number or unreadable file is an error.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Loading embedding table from {:?}", path);
        let table = Self::from_reader(BufReader::new(file), path)?;
        tracing::info!(
            "Embedding table ready: {} terms x {} dims ({:.1} MB)",
            table.len(),
            table.embedding_dim,
            (table.matrix.len() * 4) as f64 / 1_000_000.0
        );
        Ok(table)
    }

    /// Parse a table from any buffered reader.
    ///
    /// Lines are decoded as UTF-8, replacing invalid sequences. `source` is
    /// only used to label errors.
    pub fn from_reader<R: BufRead>(mut reader: R, source: &Path) -> LoadResult<Self> {
        let mut table = Self::empty();
        let mut dim: Option<usize> = None;
        let mut buf = Vec::new();
        let mut line_no = 0usize;
        let mut lossy_lines = 0usize;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source_err| LoadError::Read {
                    path: source.to_path_buf(),
                    source: source_err,
                })?;
            if read == 0 {
                break;
            }
            line_no += 1;

            // Invalid UTF-8 is replaced with U+FFFD rather than rejected.
            let line = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = line {
                lossy_lines += 1;
                tracing::trace!("Line {} of {:?} is not valid UTF-8", line_no, source);
            }

            // Components are parsed straight into the tail of the matrix.
            let start = table.matrix.len();
            let parsed = parse_line(&line, &mut table.matrix).map_err(|message| {
                LoadError::Parse {
                    path: source.to_path_buf(),
                    line: line_no,
                    message,
                }
            })?;

            let term = match parsed {
                ParsedLine::Skipped => continue,
                ParsedLine::Entry { term } => term,
            };

            let found = table.matrix.len() - start;
            let expected = *dim.get_or_insert(found);
            if found != expected {
                return Err(LoadError::Dimension {
                    path: source.to_path_buf(),
                    line: line_no,
                    expected,
                    found,
                });
            }

            table.commit_row(term, start, expected);
        }

        table.embedding_dim = dim.unwrap_or(0);
        if lossy_lines > 0 {
            tracing::warn!(
                "{} lines of {:?} contained invalid UTF-8; terms were decoded lossily",
                lossy_lines,
                source
            );
        }
        tracing::debug!(
            "Parsed {} lines into {} embeddings",
            line_no,
            table.terms.len()
        );
        Ok(table)
    }

    /// Build a table from in-memory `(term, vector)` pairs.
    ///
    /// Applies the same dimensionality rule as [`EmbeddingTable::load`].
    pub fn from_entries<I, S>(entries: I) -> LoadResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut table = Self::empty();
        let mut dim: Option<usize> = None;

        for (i, (term, vector)) in entries.into_iter().enumerate() {
            let expected = *dim.get_or_insert(vector.len());
            if vector.len() != expected {
                return Err(LoadError::Dimension {
                    path: PathBuf::from(IN_MEMORY_SOURCE),
                    line: i + 1,
                    expected,
                    found: vector.len(),
                });
            }
            let start = table.matrix.len();
            table.matrix.extend_from_slice(&vector);
            table.commit_row(term.into(), start, expected);
        }

        table.embedding_dim = dim.unwrap_or(0);
        Ok(table)
    }

    fn empty() -> Self {
        Self {
            matrix: Vec::new(),
            embedding_dim: 0,
            rows: HashMap::new(),
            terms: Vec::new(),
        }
    }

    /// Register the row just appended at `start`.
    ///
    /// A term seen twice keeps its first row slot, overwritten with the later
    /// vector, and the appended copy is dropped.
    fn commit_row(&mut self, term: String, start: usize, dim: usize) {
        if let Some(&row) = self.rows.get(&term) {
            let dest = row * dim;
            self.matrix.copy_within(start..start + dim, dest);
            self.matrix.truncate(start);
            tracing::debug!("Duplicate embedding for '{}', keeping the last one", term);
            return;
        }
        let row = self.terms.len();
        self.rows.insert(term.clone(), row);
        self.terms.push(term);
    }

    /// Dimensionality shared by every embedding (0 for an empty table).
    pub fn dim(&self) -> usize {
        self.embedding_dim
    }

    /// Number of terms in the table.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the table holds no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether `term` has an embedding. Matching is exact and case-sensitive.
    pub fn contains(&self, term: &str) -> bool {
        self.rows.contains_key(term)
    }

    /// Row index of `term`, if present.
    pub fn row_of(&self, term: &str) -> Option<usize> {
        self.rows.get(term).copied()
    }

    /// Embedding stored at `row`.
    ///
    /// Panics if `row` is out of range; rows come from [`EmbeddingTable::row_of`].
    pub fn row(&self, row: usize) -> &[f32] {
        let offset = row * self.embedding_dim;
        &self.matrix[offset..offset + self.embedding_dim]
    }

    /// Embedding for `term`, if present.
    pub fn get(&self, term: &str) -> Option<&[f32]> {
        self.row_of(term).map(|row| self.row(row))
    }

    /// Term stored at `row`.
    pub fn term(&self, row: usize) -> &str {
        &self.terms[row]
    }
}
