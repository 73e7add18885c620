//! # phylocat
//!
//! Supermatrix construction for multi-gene phylogenetics.
//!
//! This crate merges independently produced per-gene multiple sequence
//! alignments into one concatenated alignment (a *supermatrix*) and computes
//! the partition boundaries that tree-inference programs such as RAxML and
//! IQ-TREE use to fit separate substitution models per gene or per codon
//! position.
//!
//! ## Pipeline
//! 1. [`GeneAlignment::load`] reads one gene's FASTA alignment. Species keys
//!    are header text up to the first `:`; every sequence must share one width.
//! 2. [`GeneAlignmentSet`] holds all genes sorted by gene identifier. That
//!    order is fixed once and shared by every later step.
//! 3. [`SpeciesUniverse`] is the sorted union of species over all genes.
//! 4. [`concatenate`] appends each gene in order, padding absent species with
//!    `-` runs of the gene's width.
//! 5. [`emit_partitions`] lays the genes out from column 1 and splits genes
//!    listed in [`CodingGenes`] into codon-position groups.
//!
//! Gaps are always `-` and bases are always uppercased; partition coordinates
//! depend on both.
//!
//! ### Example
//! ```
//! use std::path::Path;
//! use phylocat::*;
//! let p = Path::new("mem");
//! let set = GeneAlignmentSet::from_genes(vec![
//!     GeneAlignment::parse("COI", ">Sepia:x\nACGTTA\n>Loligo:y\nACGTTG\n", p).unwrap(),
//!     GeneAlignment::parse("rRNA16S", ">Sepia\nAAA\n", p).unwrap(),
//! ]).unwrap();
//! let cat = concatenate(&set, &SpeciesUniverse::build(&set));
//! assert_eq!(cat.get("Loligo"), Some("ACGTTG---"));
//! let parts = emit_partitions(&set, &CodingGenes::default());
//! assert_eq!(partitions_text(&parts),
//!     "DNA, COI-c1c2 = 1-6\\3, 2-6\\3\nDNA, COI-c3 = 3-6\\3\nDNA, rRNA16S = 7-9\n");
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod common;
pub mod concat;
pub mod geneset;
pub mod loader;
pub mod partition;
pub mod phylip;
pub mod species;
pub mod subset;

pub use common::{parse_fasta_records, read_text, FastaRecord, PhyloError, GAP, HEADER_MARKER, SPECIES_SEPARATOR};
pub use concat::{concatenate, ConcatenatedAlignment};
pub use geneset::{alignment_files, gene_id_from_path, GeneAlignmentSet};
pub use loader::{species_key, GeneAlignment};
pub use partition::{emit_partitions, partitions_text, write_partitions, CodingGenes, CodonRange, Partition};
pub use phylip::{phylip_text, sanitize_name};
pub use species::SpeciesUniverse;
pub use subset::{species_coverage, valid_gene_subsets, SpeciesCoverage, SubsetParams};
