//! Per-gene alignment loading.
//!
//! One input file holds the alignment of a single gene. Headers look like
//! `>species:anything:else`; the species key is the text before the first
//! `:`. Sequence lines are uppercased and stripped of whitespace.
//!
//! Repeated headers for the same species are concatenated in encounter order
//! and reported through [`GeneAlignment::duplicate_species`], so callers can
//! decide whether the input is a continuation or a real duplicate.
//!
//! ### Example
//! ```rust
//! use std::path::Path;
//! use phylocat::GeneAlignment;
//! let g = GeneAlignment::parse("COI", ">Sepia:ABC1\nACG\n>Loligo:XYZ\nTTA\n", Path::new("COI.fa")).unwrap();
//! assert_eq!(g.width(), 3);
//! assert_eq!(g.sequence("Sepia"), Some("ACG"));
//! ```
//!
use std::collections::BTreeMap;
use std::path::Path;

use crate::common::{parse_fasta_records, read_text, PhyloError, SPECIES_SEPARATOR};
use crate::geneset::gene_id_from_path;

/// The validated alignment of one gene.
#[derive(Clone, Debug)]
pub struct GeneAlignment {
    gene_id: String,
    width: usize,
    sequences: BTreeMap<String, String>,
    duplicate_species: Vec<String>,
}

impl GeneAlignment {
    /// Load a gene alignment from `path`, naming the gene after the file's
    /// base name up to the first `.` (see [`gene_id_from_path`]).
    ///
    /// ## Errors
    /// - [`PhyloError::UnreadableFile`] if the file cannot be opened or read.
    /// - [`PhyloError::MalformedRecord`] if sequence data precedes the first header.
    /// - [`PhyloError::LengthMismatch`] if the species sequences differ in length.
    pub fn load(path: &Path) -> Result<Self, PhyloError> {
        Self::load_as(&gene_id_from_path(path), path)
    }

    /// Like [`GeneAlignment::load`], but with an explicit gene identifier.
    pub fn load_as(gene_id: &str, path: &Path) -> Result<Self, PhyloError> {
        let text = read_text(path)?;
        let gene = Self::parse(gene_id, &text, path)?;
        tracing::info!(
            gene = gene.gene_id.as_str(),
            species = gene.sequences.len(),
            width = gene.width,
            "loaded {}", path.display()
        );
        Ok(gene)
    }

    /// Build a gene alignment from FASTA text. `path` only labels errors.
    pub fn parse(gene_id: &str, text: &str, path: &Path) -> Result<Self, PhyloError> {
        let records = parse_fasta_records(text, path)?;

        // encounter order of species keys, used to pick the reference width
        let mut order: Vec<String> = Vec::new();
        let mut sequences: BTreeMap<String, String> = BTreeMap::new();
        let mut duplicate_species: Vec<String> = Vec::new();
        for rec in records {
            let species = species_key(&rec.id).to_string();
            match sequences.get_mut(&species) {
                Some(seq) => {
                    seq.push_str(&rec.seq);
                    if !duplicate_species.contains(&species) {
                        tracing::warn!(
                            gene = gene_id,
                            species = species.as_str(),
                            "repeated header in {}; sequence appended", path.display()
                        );
                        duplicate_species.push(species);
                    }
                }
                None => {
                    order.push(species.clone());
                    sequences.insert(species, rec.seq);
                }
            }
        }

        let width = order.first().and_then(|s| sequences.get(s)).map_or(0, |s| s.len());
        for species in &order {
            let found = sequences.get(species).map_or(0, |s| s.len());
            if found != width {
                return Err(PhyloError::LengthMismatch {
                    gene: gene_id.to_string(),
                    species: species.clone(),
                    expected: width,
                    found,
                });
            }
        }

        Ok(Self { gene_id: gene_id.to_string(), width, sequences, duplicate_species })
    }

    /// Gene identifier (file base name).
    pub fn gene_id(&self) -> &str { &self.gene_id }

    /// Number of alignment columns shared by every sequence.
    pub fn width(&self) -> usize { self.width }

    /// Species to sequence mapping, iterated in ascending species order.
    pub fn sequences(&self) -> &BTreeMap<String, String> { &self.sequences }

    /// Sequence for `species`, if present in this gene.
    pub fn sequence(&self, species: &str) -> Option<&str> {
        self.sequences.get(species).map(String::as_str)
    }

    /// Species whose header occurred more than once, in first-repeat order.
    pub fn duplicate_species(&self) -> &[String] { &self.duplicate_species }
}

/// Species key of a header: everything before the first `:`.
pub fn species_key(header: &str) -> &str {
    header.split_once(SPECIES_SEPARATOR).map_or(header, |(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(text: &str) -> Result<GeneAlignment, PhyloError> {
        GeneAlignment::parse("g", text, Path::new("g.fa"))
    }

    #[test]
    fn species_key_stops_at_first_separator() {
        assert_eq!(species_key("Ceph12:ocvul:AB1234"), "Ceph12");
        assert_eq!(species_key("plain"), "plain");
        assert_eq!(species_key(":odd"), "");
    }

    #[test]
    fn multi_line_sequences_are_joined() {
        let g = parse(">X:1\nac\ngt\n>Y:2\nTT\nTT\n").unwrap();
        assert_eq!(g.width(), 4);
        assert_eq!(g.sequence("X"), Some("ACGT"));
        assert_eq!(g.sequence("Y"), Some("TTTT"));
        assert!(g.duplicate_species().is_empty());
    }

    #[test]
    fn repeated_header_appends_and_is_flagged() {
        let g = parse(">X:a\nAC\n>Y\nTTTT\n>X:b\nGT\n>X:c\n").unwrap();
        assert_eq!(g.sequence("X"), Some("ACGT"));
        assert_eq!(g.duplicate_species(), ["X".to_string()]);
    }

    #[test]
    fn unequal_lengths_name_the_offender() {
        let err = parse(">A\nACGT\n>B\nACGT\n>C\nACG\n").unwrap_err();
        match err {
            PhyloError::LengthMismatch { gene, species, expected, found } => {
                assert_eq!(gene, "g");
                assert_eq!(species, "C");
                assert_eq!((expected, found), (4, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn width_comes_from_first_encountered_species() {
        // "Z" sorts last but is read first, so "A" is the offender
        let err = parse(">Z\nACGTA\n>A\nACGT\n").unwrap_err();
        assert!(matches!(err, PhyloError::LengthMismatch { ref species, expected: 5, .. } if species == "A"));
    }

    #[test]
    fn empty_file_is_a_zero_width_gene() {
        let g = parse("").unwrap();
        assert_eq!(g.width(), 0);
        assert!(g.sequences().is_empty());
    }

    #[test]
    fn load_names_gene_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cytb.aln.fa");
        std::fs::write(&path, ">Nautilus:1\nACG\n").unwrap();
        let g = GeneAlignment::load(&path).unwrap();
        assert_eq!(g.gene_id(), "cytb");
        assert_eq!(g.sequence("Nautilus"), Some("ACG"));
    }

    #[test]
    fn load_reports_unreadable_path() {
        let err = GeneAlignment::load(Path::new("/no/such/dir/g.fa")).unwrap_err();
        match err {
            PhyloError::UnreadableFile { path, .. } => assert_eq!(path, PathBuf::from("/no/such/dir/g.fa")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
