//! Common helpers shared by the pipeline stages: the error taxonomy, the
//! fixed alignment policy characters, and a minimal FASTA record reader.
//!
//! ## FASTA
//! The reader is line based and suitable for per-gene alignment files. Every
//! `>` line opens a new record; all following non-blank lines are appended to
//! that record with embedded whitespace removed and letters uppercased.
//! Repeated headers are **not** merged here; that policy belongs to the
//! loader.
//!
//! ## Examples
//! ```rust
//! use std::path::Path;
//! use phylocat::parse_fasta_records;
//! let recs = parse_fasta_records(">sp1:COI\nac gt\n>sp2\nTTTT\n", Path::new("mem.fa")).unwrap();
//! assert_eq!(recs.len(), 2);
//! assert_eq!(recs[0].id, "sp1:COI");
//! assert_eq!(recs[0].seq, "ACGT");
//! ```
//!
use std::path::{Path, PathBuf};

/// Gap character used to fill species missing from a gene.
pub const GAP: char = '-';

/// Leading character of a FASTA header line.
pub const HEADER_MARKER: char = '>';

/// Separator ending the species key inside a header (`>species:rest`).
pub const SPECIES_SEPARATOR: char = ':';

/// Errors that can be returned by the pipeline stages in this crate.
#[derive(thiserror::Error, Debug)]
pub enum PhyloError {
    /// Returned if an input file or directory cannot be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Returned if a sequence line appears before any header line.
    #[error("{}: line {line}: sequence data before the first '>' header", path.display())]
    MalformedRecord { path: PathBuf, line: usize },
    /// Returned if the sequences of one alignment disagree in length.
    #[error("gene {gene}: species {species} has length {found}, expected {expected}")]
    LengthMismatch { gene: String, species: String, expected: usize, found: usize },
    /// Returned if two input files resolve to the same gene identifier.
    #[error("duplicate gene {gene}: {} and {}", first.display(), second.display())]
    DuplicateGene { gene: String, first: PathBuf, second: PathBuf },
    /// Returned when a caller-supplied parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

/// A single FASTA record as read from disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastaRecord {
    /// Full header text after the `>` marker.
    pub id: String,
    /// Sequence with whitespace removed, uppercased. Gap symbols are kept as-is.
    pub seq: String,
}

/// Uppercase one sequence line and drop any whitespace inside it.
pub(crate) fn normalize_sequence_line(line: &str) -> String {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Parse FASTA text into records in encounter order.
///
/// `path` is only used to label errors.
///
/// ## Errors
/// [`PhyloError::MalformedRecord`] if a non-blank line precedes the first header.
pub fn parse_fasta_records(text: &str, path: &Path) -> Result<Vec<FastaRecord>, PhyloError> {
    let mut out: Vec<FastaRecord> = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(rest) = line.strip_prefix(HEADER_MARKER) {
            out.push(FastaRecord { id: rest.to_string(), seq: String::new() });
            continue;
        }
        let seq = normalize_sequence_line(line);
        if seq.is_empty() { continue; }
        match out.last_mut() {
            Some(rec) => rec.seq.push_str(&seq),
            None => return Err(PhyloError::MalformedRecord { path: path.to_path_buf(), line: idx + 1 }),
        }
    }
    Ok(out)
}

/// Read a whole file into memory, mapping failures to [`PhyloError::UnreadableFile`].
///
/// Bytes that are not valid UTF-8 (Latin-1 taxon names, say) are replaced
/// with U+FFFD instead of failing the read.
pub fn read_text(path: &Path) -> Result<String, PhyloError> {
    let bytes = std::fs::read(path)
        .map_err(|source| PhyloError::UnreadableFile { path: path.to_path_buf(), source })?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("{}: invalid UTF-8 replaced", path.display());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_uppercased_and_whitespace_free() {
        let recs = parse_fasta_records(">a:x\nac g\n\tT\n\n>b\n", Path::new("t.fa")).unwrap();
        assert_eq!(recs, vec![
            FastaRecord { id: "a:x".into(), seq: "ACGT".into() },
            FastaRecord { id: "b".into(), seq: String::new() },
        ]);
    }

    #[test]
    fn sequence_before_header_is_malformed() {
        let err = parse_fasta_records("\nACGT\n>a\nAC\n", Path::new("bad.fa")).unwrap_err();
        match err {
            PhyloError::MalformedRecord { path, line } => {
                assert_eq!(path, PathBuf::from("bad.fa"));
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let recs = parse_fasta_records(">a\r\nAC\r\nGT\r\n", Path::new("t.fa")).unwrap();
        assert_eq!(recs[0].id, "a");
        assert_eq!(recs[0].seq, "ACGT");
    }

    #[test]
    fn latin1_header_does_not_fail_the_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.fa");
        std::fs::write(&path, b">Sepia_\xe9l\xe9gans:1\nACGT\n").unwrap();
        let text = read_text(&path).unwrap();
        let recs = parse_fasta_records(&text, &path).unwrap();
        assert_eq!(recs[0].id, "Sepia_\u{FFFD}l\u{FFFD}gans:1");
        assert_eq!(recs[0].seq, "ACGT");
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = read_text(Path::new("/definitely/not/here.fa")).unwrap_err();
        assert!(matches!(err, PhyloError::UnreadableFile { .. }));
    }
}
