//! Sequential Phylip output for a FASTA alignment.
//!
//! The first line is ` <nseqs> <ncols>`, followed by one `id sequence` line
//! per record. Characters that Phylip/Newick readers reject in taxon names
//! are replaced with `|`. Names are not truncated to ten characters.
//!
//! ### Example
//! ```rust
//! use std::path::Path;
//! use phylocat::{parse_fasta_records, phylip_text};
//! let recs = parse_fasta_records(">a(1)\nAC-\n>b\nACG\n", Path::new("mem")).unwrap();
//! assert_eq!(phylip_text(&recs, Path::new("mem")).unwrap(), " 2 3\na|1| AC-\nb ACG\n");
//! ```
//!
use std::path::Path;

use crate::common::{FastaRecord, PhyloError};

/// Characters not allowed in Phylip taxon names.
pub const ILLEGAL_NAME_CHARS: [char; 7] = ['(', ')', '[', ']', ':', ',', ';'];

/// Replace characters Phylip readers choke on with `|`.
pub fn sanitize_name(id: &str) -> String {
    id.chars().map(|c| if ILLEGAL_NAME_CHARS.contains(&c) { '|' } else { c }).collect()
}

/// Render `records` as sequential Phylip. `path` only labels errors.
///
/// ## Errors
/// [`PhyloError::LengthMismatch`] if the records are not all the same length.
pub fn phylip_text(records: &[FastaRecord], path: &Path) -> Result<String, PhyloError> {
    let cols = records.first().map_or(0, |r| r.seq.len());
    if let Some(bad) = records.iter().find(|r| r.seq.len() != cols) {
        return Err(PhyloError::LengthMismatch {
            gene: path.display().to_string(),
            species: bad.id.clone(),
            expected: cols,
            found: bad.seq.len(),
        });
    }
    let mut out = format!(" {} {}\n", records.len(), cols);
    for r in records {
        out.push_str(&sanitize_name(&r.id));
        out.push(' ');
        out.push_str(&r.seq);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, seq: &str) -> FastaRecord {
        FastaRecord { id: id.into(), seq: seq.into() }
    }

    #[test]
    fn names_are_sanitized_but_not_truncated() {
        assert_eq!(sanitize_name("Ceph1:ocvul:[x],y;z"), "Ceph1|ocvul||x||y|z");
        assert_eq!(sanitize_name("Octopus_vulgaris_long_name"), "Octopus_vulgaris_long_name");
    }

    #[test]
    fn header_counts_sequences_and_columns() {
        let text = phylip_text(&[rec("a", "AC--T"), rec("b", "ACGGT"), rec("c", "-----")], Path::new("x.fa")).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(" 3 5"));
        assert_eq!(lines.next(), Some("a AC--T"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn ragged_alignment_is_rejected() {
        let err = phylip_text(&[rec("a", "ACG"), rec("b", "AC")], Path::new("x.fa")).unwrap_err();
        assert!(matches!(err, PhyloError::LengthMismatch { ref species, expected: 3, found: 2, .. } if species == "b"));
    }

    #[test]
    fn empty_input_gives_zero_header() {
        assert_eq!(phylip_text(&[], Path::new("x.fa")).unwrap(), " 0 0\n");
    }
}
