//! Anti-repeat lens selection
//!
//! Narrows the deck to an eligible set and draws uniformly from it.
//! Exclusions are dropped in a fixed order when nothing remains:
//!
//! 1. Exclude every id in the history and the lens on screen.
//! 2. Exclude only the lens on screen.
//! 3. Exclude nothing.
//!
//! The only way to get `None` back is an empty deck.

use rand::Rng;

use crate::core::types::{Lens, LensId};

/// Which exclusion rules produced the eligible set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityTier {
    /// History and current lens both excluded
    Strict,
    /// History dropped, current lens still excluded
    SkipCurrent,
    /// Whole deck eligible
    Unrestricted,
}

/// Compute the eligible subset of `deck`
///
/// Every id in `history` counts as recently shown, whatever its length.
pub fn eligible_lenses<'a>(
    deck: &'a [Lens],
    history: &[LensId],
    current: Option<&LensId>,
) -> (Vec<&'a Lens>, EligibilityTier) {
    let is_current = |lens: &Lens| current.is_some_and(|id| &lens.id == id);

    let strict: Vec<&Lens> = deck
        .iter()
        .filter(|lens| !history.contains(&lens.id))
        .filter(|lens| !is_current(*lens))
        .collect();
    if !strict.is_empty() {
        return (strict, EligibilityTier::Strict);
    }

    let skip_current: Vec<&Lens> = deck.iter().filter(|lens| !is_current(*lens)).collect();
    if !skip_current.is_empty() {
        return (skip_current, EligibilityTier::SkipCurrent);
    }

    (deck.iter().collect(), EligibilityTier::Unrestricted)
}

/// Pick the next lens to show
///
/// `window` is the anti-repeat size the history was recorded with; it is
/// only reported in logs, since the history is already bounded by it.
/// Deterministic for a given rng state. Never mutates its inputs.
pub fn select_next<'a, R: Rng + ?Sized>(
    deck: &'a [Lens],
    history: &[LensId],
    window: usize,
    current: Option<&LensId>,
    rng: &mut R,
) -> Option<&'a Lens> {
    if deck.is_empty() {
        tracing::debug!("Deck is empty, nothing to select");
        return None;
    }

    let (eligible, tier) = eligible_lenses(deck, history, current);
    if tier != EligibilityTier::Strict {
        tracing::debug!(?tier, deck = deck.len(), history = history.len(), window, "Anti-repeat relaxed");
    }

    let index = rng.gen_range(0..eligible.len());
    Some(eligible[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn deck_of(ids: &[&str]) -> Vec<Lens> {
        ids.iter().map(|id| Lens::new(*id, format!("Principle {}", id))).collect()
    }

    fn ids(ids: &[&str]) -> Vec<LensId> {
        ids.iter().map(|id| LensId::new(*id)).collect()
    }

    #[test]
    fn test_empty_deck_returns_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let history = ids(&["a", "b"]);
        assert!(select_next(&[], &history, 3, None, &mut rng).is_none());
        assert!(select_next(&[], &[], 0, Some(&LensId::new("a")), &mut rng).is_none());
    }

    #[test]
    fn test_history_and_current_excluded() {
        // Deck [A..E], history [A,B], N=2, current B -> {C,D,E}
        let deck = deck_of(&["A", "B", "C", "D", "E"]);
        let history = ids(&["A", "B"]);
        let current = LensId::new("B");

        let (eligible, tier) = eligible_lenses(&deck, &history, Some(&current));
        let eligible_ids: Vec<&str> = eligible.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(eligible_ids, vec!["C", "D", "E"]);
        assert_eq!(tier, EligibilityTier::Strict);

        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let picked = select_next(&deck, &history, 2, Some(&current), &mut rng).unwrap();
            assert!(["C", "D", "E"].contains(&picked.id.as_str()));
        }
    }

    #[test]
    fn test_two_item_deck_picks_the_other() {
        // Deck [A,B], history [A], N=1, current A -> B
        let deck = deck_of(&["A", "B"]);
        let history = ids(&["A"]);
        let current = LensId::new("A");

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let picked = select_next(&deck, &history, 1, Some(&current), &mut rng).unwrap();
            assert_eq!(picked.id.as_str(), "B");
        }
    }

    #[test]
    fn test_single_item_deck_repeats() {
        // Deck [A], history [], N=3, current A -> A via the unrestricted tier
        let deck = deck_of(&["A"]);
        let current = LensId::new("A");
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let (_, tier) = eligible_lenses(&deck, &[], Some(&current));
        assert_eq!(tier, EligibilityTier::Unrestricted);

        let picked = select_next(&deck, &[], 3, Some(&current), &mut rng).unwrap();
        assert_eq!(picked.id.as_str(), "A");
    }

    #[test]
    fn test_history_covering_deck_drops_to_skip_current() {
        let deck = deck_of(&["A", "B", "C"]);
        let history = ids(&["C", "B", "A"]);
        let current = LensId::new("C");

        let (eligible, tier) = eligible_lenses(&deck, &history, Some(&current));
        assert_eq!(tier, EligibilityTier::SkipCurrent);
        let eligible_ids: Vec<&str> = eligible.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(eligible_ids, vec!["A", "B"]);
    }

    #[test]
    fn test_zero_window_still_filters_history() {
        // History is read as given; the window does not shrink it
        let deck = deck_of(&["A", "B", "C"]);
        let history = ids(&["A", "B"]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let (eligible, tier) = eligible_lenses(&deck, &history, None);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id.as_str(), "C");
        assert_eq!(tier, EligibilityTier::Strict);

        let picked = select_next(&deck, &history, 0, None, &mut rng).unwrap();
        assert_eq!(picked.id.as_str(), "C");
    }

    #[test]
    fn test_empty_history_still_skips_current() {
        let deck = deck_of(&["A", "B"]);
        let current = LensId::new("A");
        let (eligible, _) = eligible_lenses(&deck, &[], Some(&current));
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id.as_str(), "B");
    }

    #[test]
    fn test_history_longer_than_window_fully_excluded() {
        // History recorded under a larger window, then the window shrank
        let deck = deck_of(&["A", "B", "C", "D"]);
        let history = ids(&["A", "B"]);
        let current = LensId::new("C");

        let (eligible, tier) = eligible_lenses(&deck, &history, Some(&current));
        let eligible_ids: Vec<&str> = eligible.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(eligible_ids, vec!["D"]);
        assert_eq!(tier, EligibilityTier::Strict);

        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let picked = select_next(&deck, &history, 1, Some(&current), &mut rng).unwrap();
            assert_eq!(picked.id.as_str(), "D");
        }
    }

    #[test]
    fn test_no_current_on_first_open() {
        let deck = deck_of(&["A", "B"]);
        let history = ids(&["A"]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let picked = select_next(&deck, &history, 7, None, &mut rng).unwrap();
        assert_eq!(picked.id.as_str(), "B");
    }

    #[test]
    fn test_same_seed_same_pick() {
        let deck = deck_of(&["A", "B", "C", "D", "E", "F"]);
        let history = ids(&["A"]);

        let mut rng1 = ChaCha8Rng::seed_from_u64(42);
        let mut rng2 = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            let a = select_next(&deck, &history, 1, None, &mut rng1).unwrap();
            let b = select_next(&deck, &history, 1, None, &mut rng2).unwrap();
            assert_eq!(a.id, b.id);
        }
    }

    #[test]
    fn test_inputs_not_mutated() {
        let deck = deck_of(&["A", "B", "C"]);
        let history = ids(&["B"]);
        let deck_before = deck.clone();
        let history_before = history.clone();

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let _ = select_next(&deck, &history, 1, Some(&LensId::new("A")), &mut rng);

        assert_eq!(deck, deck_before);
        assert_eq!(history, history_before);
    }

    #[test]
    fn test_selection_is_roughly_uniform() {
        // Eligible set {C, D, E, F}; each should land near 1/4
        let deck = deck_of(&["A", "B", "C", "D", "E", "F"]);
        let history = ids(&["A", "B"]);
        let mut rng = ChaCha8Rng::seed_from_u64(2024);

        let trials = 20_000;
        let mut counts = std::collections::HashMap::new();
        for _ in 0..trials {
            let picked = select_next(&deck, &history, 2, None, &mut rng).unwrap();
            *counts.entry(picked.id.as_str().to_string()).or_insert(0u32) += 1;
        }

        assert_eq!(counts.len(), 4);
        let expected = trials as f64 / 4.0;
        for (id, count) in &counts {
            let deviation = (*count as f64 - expected).abs() / expected;
            assert!(deviation < 0.05, "{} picked {} times, expected ~{}", id, count, expected);
        }
    }
}
