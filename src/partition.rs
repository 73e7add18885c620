//! RAxML-style partition boundaries for a concatenated alignment.
//!
//! Coordinates are 1-based and inclusive. Genes are laid out back to back in
//! the order of the [`GeneAlignmentSet`], so the emitter must walk the same
//! set the concatenator used.
//!
//! A protein-coding gene is split by codon position using the step-3 range
//! notation understood by RAxML and IQ-TREE:
//!
//! ```text
//! DNA, COI-c1c2 = 1-6\3, 2-6\3
//! DNA, COI-c3 = 3-6\3
//! ```
//!
//! No check is made that a coding gene's width is a multiple of three; a
//! trailing partial codon simply leaves the third-position group shorter.
//!
use std::collections::BTreeSet;
use std::fmt;
use std::io::Write;

use crate::geneset::GeneAlignmentSet;

/// Gene names that are partitioned by codon position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodingGenes(BTreeSet<String>);

impl CodingGenes {
    /// Protein-coding markers of the cephalopod data set this tool was built for.
    pub const DEFAULT_NAMES: [&'static str; 6] = ["COI", "cytb", "H3", "odh", "opsin", "pax"];

    /// An empty set: every gene gets one undivided partition.
    pub fn none() -> Self { Self(BTreeSet::new()) }

    /// Exact (case-sensitive) membership test.
    pub fn contains(&self, gene_id: &str) -> bool { self.0.contains(gene_id) }

    pub fn iter(&self) -> impl Iterator<Item = &str> { self.0.iter().map(String::as_str) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl Default for CodingGenes {
    fn default() -> Self { Self::DEFAULT_NAMES.into_iter().collect() }
}

impl<S: Into<String>> FromIterator<S> for CodingGenes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A `start-stop\3` range: every third column from `start` up to `stop`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodonRange {
    pub start: usize,
    pub stop: usize,
}

impl CodonRange {
    /// Number of columns selected by the range.
    pub fn count(&self) -> usize {
        if self.start > self.stop { 0 } else { (self.stop - self.start) / 3 + 1 }
    }

    /// Selected columns in ascending order.
    pub fn positions(&self) -> impl Iterator<Item = usize> {
        (self.start..=self.stop).step_by(3)
    }
}

impl fmt::Display for CodonRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}\\3", self.start, self.stop)
    }
}

/// One gene's slice of the concatenated alignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    pub gene_id: String,
    pub is_coding: bool,
    pub start: usize,
    pub stop: usize,
}

impl Partition {
    /// Number of columns covered.
    pub fn len(&self) -> usize { self.stop + 1 - self.start }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// First-and-second and third codon-position ranges, for coding genes.
    pub fn codon_groups(&self) -> Option<([CodonRange; 2], CodonRange)> {
        if !self.is_coding { return None; }
        let c1c2 = [
            CodonRange { start: self.start, stop: self.stop },
            CodonRange { start: self.start + 1, stop: self.stop },
        ];
        let c3 = CodonRange { start: self.start + 2, stop: self.stop };
        Some((c1c2, c3))
    }
}

impl fmt::Display for Partition {
    /// One line for a non-coding gene, two lines (joined by `\n`) for a coding gene.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.codon_groups() {
            Some(([c1, c2], c3)) => {
                writeln!(f, "DNA, {}-c1c2 = {}, {}", self.gene_id, c1, c2)?;
                write!(f, "DNA, {}-c3 = {}", self.gene_id, c3)
            }
            None => write!(f, "DNA, {} = {}-{}", self.gene_id, self.start, self.stop),
        }
    }
}

/// Lay out one partition per gene, in set order, starting at column 1.
pub fn emit_partitions(set: &GeneAlignmentSet, coding: &CodingGenes) -> Vec<Partition> {
    let mut start = 1usize;
    let mut out = Vec::with_capacity(set.len());
    for gene in set.genes() {
        // a zero-width gene yields stop == start - 1 and leaves the cursor unchanged
        let stop = start + gene.width() - 1;
        let is_coding = coding.contains(gene.gene_id());
        if gene.width() == 0 {
            tracing::warn!(gene = gene.gene_id(), start, "zero-width gene; partition {}-{} will be rejected by RAxML", start, stop);
        } else {
            tracing::debug!(gene = gene.gene_id(), start, stop, is_coding, "partition");
        }
        out.push(Partition { gene_id: gene.gene_id().to_string(), is_coding, start, stop });
        start = stop + 1;
    }
    out
}

/// Partition text, one or two lines per gene, each ending in a newline.
pub fn partitions_text(parts: &[Partition]) -> String {
    parts.iter().map(|p| format!("{p}\n")).collect()
}

/// Write partition text to `w`.
pub fn write_partitions<W: Write>(parts: &[Partition], mut w: W) -> std::io::Result<()> {
    for p in parts {
        writeln!(w, "{p}")?;
    }
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::GeneAlignment;
    use std::path::Path;

    fn set_of_widths(genes: &[(&str, usize)]) -> GeneAlignmentSet {
        let genes = genes
            .iter()
            .map(|(id, w)| {
                let text = format!(">X\n{}\n", "A".repeat(*w));
                GeneAlignment::parse(id, &text, Path::new("mem")).unwrap()
            })
            .collect();
        GeneAlignmentSet::from_genes(genes).unwrap()
    }

    #[test]
    fn non_coding_genes_are_contiguous() {
        let parts = emit_partitions(&set_of_widths(&[("g1", 3), ("g2", 5)]), &CodingGenes::none());
        assert_eq!(partitions_text(&parts), "DNA, g1 = 1-3\nDNA, g2 = 4-8\n");
    }

    #[test]
    fn coding_gene_is_split_by_codon_position() {
        let set = set_of_widths(&[("COI", 6), ("zeta", 2)]);
        let parts = emit_partitions(&set, &CodingGenes::default());
        assert_eq!(
            partitions_text(&parts),
            "DNA, COI-c1c2 = 1-6\\3, 2-6\\3\nDNA, COI-c3 = 3-6\\3\nDNA, zeta = 7-8\n"
        );
        assert_eq!(parts[1].start, 7);
    }

    #[test]
    fn partitions_tile_the_alignment_from_column_one() {
        let set = set_of_widths(&[("COI", 7), ("a", 1), ("b", 13), ("cytb", 9), ("odh", 2)]);
        let parts = emit_partitions(&set, &CodingGenes::default());
        assert_eq!(parts[0].start, 1);
        for w in parts.windows(2) {
            assert_eq!(w[0].stop + 1, w[1].start);
        }
        assert_eq!(parts.last().unwrap().stop, set.total_width());
    }

    #[test]
    fn codon_groups_cover_every_column_once() {
        for width in 1..=20usize {
            let p = Partition { gene_id: "g".into(), is_coding: true, start: 11, stop: 10 + width };
            let ([c1, c2], c3) = p.codon_groups().unwrap();
            assert_eq!(c1.count() + c2.count() + c3.count(), width, "width {width}");
            let mut cols: Vec<usize> = c1.positions().chain(c2.positions()).chain(c3.positions()).collect();
            cols.sort_unstable();
            assert_eq!(cols, (11..=10 + width).collect::<Vec<_>>());
        }
    }

    #[test]
    fn partial_codon_shortens_third_position() {
        let p = Partition { gene_id: "g".into(), is_coding: true, start: 1, stop: 7 };
        let ([c1, c2], c3) = p.codon_groups().unwrap();
        assert_eq!((c1.count(), c2.count(), c3.count()), (3, 2, 2));
    }

    #[test]
    fn coding_names_are_case_sensitive() {
        let coding: CodingGenes = ["COI"].into_iter().collect();
        assert!(coding.contains("COI"));
        assert!(!coding.contains("coi"));
        assert!(CodingGenes::none().is_empty());
        assert_eq!(CodingGenes::default().len(), 6);
    }

    #[test]
    fn zero_width_gene_keeps_the_cursor() {
        let genes = vec![
            GeneAlignment::parse("a", ">X\nACGT\n", Path::new("mem")).unwrap(),
            GeneAlignment::parse("b", "", Path::new("mem")).unwrap(),
            GeneAlignment::parse("c", ">X\nAC\n", Path::new("mem")).unwrap(),
        ];
        let set = GeneAlignmentSet::from_genes(genes).unwrap();
        let parts = emit_partitions(&set, &CodingGenes::none());
        assert_eq!((parts[1].start, parts[1].stop), (5, 4));
        assert!(parts[1].is_empty());
        assert_eq!((parts[2].start, parts[2].stop), (5, 6));
    }

    #[test]
    fn writer_matches_text() {
        let parts = emit_partitions(&set_of_widths(&[("H3", 4)]), &CodingGenes::default());
        let mut buf = Vec::new();
        write_partitions(&parts, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), partitions_text(&parts));
    }
}
