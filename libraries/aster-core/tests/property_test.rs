//! Property-based tests for the dominance resolver
//!
//! Uses proptest to verify resolver invariants across random trait lists.

use aster_core::{CategoryId, CategoryRegistry, CharmTrait, DominanceResolver};
use proptest::prelude::*;

// ===== Helpers =====

fn recognized_names() -> Vec<String> {
    CategoryRegistry::standard()
        .iter()
        .flat_map(|c| c.recognized_traits.clone())
        .collect()
}

/// Mix of recognised names and ASCII noise (which never matches the Korean table)
fn arbitrary_trait() -> impl Strategy<Value = CharmTrait> {
    let known = prop::sample::select(recognized_names());
    let name = prop_oneof![known, "[a-z0-9]{1,12}"];
    (name, 1i32..=10).prop_map(|(name, level)| CharmTrait::new(name, level))
}

fn arbitrary_traits() -> impl Strategy<Value = Vec<CharmTrait>> {
    prop::collection::vec(arbitrary_trait(), 0..20)
}

// ===== Property Tests =====

proptest! {
    /// Property: the result is always a registry category
    #[test]
    fn result_is_always_a_registry_category(traits in arbitrary_traits()) {
        let registry = CategoryRegistry::standard();
        let resolver = DominanceResolver::new(&registry);

        let dominant = resolver.resolve_dominant_category(&traits);
        prop_assert!(registry.iter().any(|c| c == dominant));
    }

    /// Property: the winner has the maximum count and no earlier category ties it
    #[test]
    fn winner_is_earliest_maximum(traits in arbitrary_traits()) {
        let registry = CategoryRegistry::standard();
        let resolver = DominanceResolver::new(&registry);

        let counts = resolver.count_categories(&traits);
        let dominant = resolver.resolve_dominant_category(&traits).id;

        if counts.is_empty() {
            prop_assert_eq!(dominant, CategoryId::Passion);
        } else {
            let max = registry.iter().map(|c| counts.get(c.id)).max().unwrap_or(0);
            prop_assert_eq!(counts.get(dominant), max);

            let first_at_max = registry
                .iter()
                .find(|c| counts.get(c.id) == max)
                .map(|c| c.id);
            prop_assert_eq!(Some(dominant), first_at_max);
        }
    }

    /// Property: ASCII-only names never classify, so the result is the fallback
    #[test]
    fn ascii_noise_falls_back(names in prop::collection::vec("[a-z0-9]{1,12}", 0..10)) {
        let registry = CategoryRegistry::standard();
        let resolver = DominanceResolver::new(&registry);

        let traits: Vec<_> = names.into_iter().map(|n| CharmTrait::new(n, 1)).collect();
        prop_assert_eq!(resolver.resolve_dominant_category(&traits).id, CategoryId::Passion);
    }

    /// Property: trait order and levels never change the outcome
    #[test]
    fn order_and_levels_are_irrelevant(traits in arbitrary_traits(), level in 1i32..=10) {
        let registry = CategoryRegistry::standard();
        let resolver = DominanceResolver::new(&registry);

        let mut reordered: Vec<_> = traits
            .iter()
            .rev()
            .map(|t| CharmTrait::new(t.name.clone(), level))
            .collect();
        let mid = reordered.len() / 2;
        reordered.rotate_left(mid);

        prop_assert_eq!(
            resolver.resolve_dominant_category(&traits).id,
            resolver.resolve_dominant_category(&reordered).id
        );
    }

    /// Property: counts never exceed the number of traits
    #[test]
    fn counts_are_bounded(traits in arbitrary_traits()) {
        let registry = CategoryRegistry::standard();
        let resolver = DominanceResolver::new(&registry);

        prop_assert!(resolver.count_categories(&traits).total() <= traits.len());
    }
}
