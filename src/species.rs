//! The species universe: every species seen in any gene, sorted once.
use std::collections::BTreeSet;

use crate::geneset::GeneAlignmentSet;

/// Deduplicated species identifiers in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpeciesUniverse {
    species: Vec<String>,
}

impl SpeciesUniverse {
    /// Union of the species keys of all genes in `set`.
    pub fn build(set: &GeneAlignmentSet) -> Self {
        let all: BTreeSet<&String> = set.genes().iter().flat_map(|g| g.sequences().keys()).collect();
        Self { species: all.into_iter().cloned().collect() }
    }

    pub fn species(&self) -> &[String] { &self.species }

    pub fn iter(&self) -> impl Iterator<Item = &str> { self.species.iter().map(String::as_str) }

    pub fn contains(&self, species: &str) -> bool {
        self.species.binary_search_by(|s| s.as_str().cmp(species)).is_ok()
    }

    pub fn len(&self) -> usize { self.species.len() }

    pub fn is_empty(&self) -> bool { self.species.is_empty() }
}
