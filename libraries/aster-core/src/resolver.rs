//! Dominance resolution
//!
//! Maps trait names onto categories and picks the category that best
//! represents a track. The result only drives theming; it never fails and
//! falls back to `passion` when nothing classifies.

use crate::category::{Category, CategoryId, CategoryRegistry};
use crate::types::{CharmTrait, Track};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Per-category trait counts
///
/// Absent entries mean zero. Iteration order of the map is irrelevant to
/// resolution; the registry's declaration order decides ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    counts: BTreeMap<CategoryId, usize>,
}

impl CategoryCounts {
    /// Create an empty counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more trait for `id`
    pub fn increment(&mut self, id: CategoryId) {
        *self.counts.entry(id).or_insert(0) += 1;
    }

    /// Count for `id` (zero when never incremented)
    pub fn get(&self, id: CategoryId) -> usize {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Total number of classified traits
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// True when no trait classified
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Resolves trait lists to categories against a borrowed registry
#[derive(Debug, Clone, Copy)]
pub struct DominanceResolver<'r> {
    registry: &'r CategoryRegistry,
}

impl<'r> DominanceResolver<'r> {
    /// Create a resolver over `registry`
    pub fn new(registry: &'r CategoryRegistry) -> Self {
        Self { registry }
    }

    /// The registry this resolver reads
    pub fn registry(&self) -> &'r CategoryRegistry {
        self.registry
    }

    /// Classify a single trait name
    ///
    /// First category in declaration order with any matching recognised
    /// trait wins, even if a later category would also match.
    pub fn classify_trait_name(&self, trait_name: &str) -> Option<CategoryId> {
        self.registry
            .iter()
            .find(|category| category.recognizes(trait_name))
            .map(|category| category.id)
    }

    /// Count classified traits per category
    pub fn count_categories(&self, traits: &[CharmTrait]) -> CategoryCounts {
        let mut counts = CategoryCounts::new();
        for charm in traits {
            match self.classify_trait_name(&charm.name) {
                Some(id) => counts.increment(id),
                None => debug!(trait_name = %charm.name, "Trait matches no category"),
            }
        }
        counts
    }

    /// Pick the dominant category of a trait list
    ///
    /// Only a strictly greater count replaces the leader, so ties go to the
    /// category declared first. With no classified traits the fallback
    /// category is returned.
    pub fn resolve_dominant_category(&self, traits: &[CharmTrait]) -> &'r Category {
        let counts = self.count_categories(traits);

        let mut leader = CategoryId::FALLBACK;
        let mut max_count = 0;
        for category in self.registry.iter() {
            let count = counts.get(category.id);
            if count > max_count {
                max_count = count;
                leader = category.id;
            }
        }

        debug!(
            category = %leader,
            count = max_count,
            classified = counts.total(),
            traits = traits.len(),
            "Resolved dominant category"
        );

        self.registry.get(leader)
    }

    /// Dominant category of a track
    pub fn resolve_track(&self, track: &Track) -> &'r Category {
        self.resolve_dominant_category(&track.traits)
    }
}
