use clap::ValueEnum;
use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Maximum number of items in a suggested outfit.
pub const OUTFIT_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sunny,
    Rainy,
    Cold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Event {
    Casual,
    Formal,
    Party,
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Weather::Sunny => "sunny",
            Weather::Rainy => "rainy",
            Weather::Cold => "cold",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Event::Casual => "casual",
            Event::Formal => "formal",
            Event::Party => "party",
        };
        write!(f, "{}", s)
    }
}

lazy_static! {
    /// Keywords that make a closet item relevant for a weather/event
    /// combination. Pairs with no entry (rainy + party) resolve to an
    /// empty tag set, so selection falls through to the random branch.
    static ref WEATHER_EVENT_TAGS: HashMap<(Weather, Event), Vec<&'static str>> = {
        use Event::*;
        use Weather::*;

        let mut m = HashMap::new();
        m.insert((Sunny, Casual), vec!["t-shirt", "shorts", "sunglasses", "jeans"]);
        m.insert((Sunny, Formal), vec!["blazer", "chinos", "oxfords"]);
        m.insert((Rainy, Casual), vec!["hoodie", "raincoat", "boots", "jeans"]);
        m.insert((Rainy, Formal), vec!["trench coat", "umbrella", "loafers"]);
        m.insert((Cold, Casual), vec!["jacket", "sweater", "beanie", "jeans"]);
        m.insert((Cold, Formal), vec!["coat", "scarf", "boots"]);
        m.insert((Sunny, Party), vec!["dress", "polo shirt", "sneakers"]);
        m.insert((Cold, Party), vec!["sweater", "coat", "boots"]);
        m
    };
}

/// Tags for a weather/event pair, empty when no entry exists.
pub fn tags_for(weather: Weather, event: Event) -> &'static [&'static str] {
    WEATHER_EVENT_TAGS
        .get(&(weather, event))
        .map(|tags| tags.as_slice())
        .unwrap_or(&[])
}

/// Pick up to three closet items for the given context.
///
/// Items are scored by how many context tags appear (case-insensitively)
/// inside their label, ranked by descending score with first-seen order
/// preserved on ties, and deduplicated. If fewer than three items score
/// above zero, the remainder is filled from the unselected labels in
/// uniformly random order.
pub fn generate_outfit(items: &[String], weather: Weather, event: Event) -> Vec<String> {
    generate_outfit_with(items, weather, event, &mut rand::thread_rng())
}

/// Same as [`generate_outfit`] with a caller-supplied RNG, so the random
/// fallback branch can be seeded in tests.
pub fn generate_outfit_with<R: Rng>(
    items: &[String],
    weather: Weather,
    event: Event,
    rng: &mut R,
) -> Vec<String> {
    let tags = tags_for(weather, event);

    let mut scored: Vec<(&String, usize)> = items
        .iter()
        .map(|item| {
            let lowered = item.to_lowercase();
            let score = tags.iter().filter(|tag| lowered.contains(**tag)).count();
            (item, score)
        })
        .collect();

    // Stable sort: ties keep first-seen order
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let mut selected: Vec<String> = Vec::new();
    for (item, score) in &scored {
        if *score > 0 && !selected.iter().any(|s| s == *item) {
            selected.push((*item).clone());
            if selected.len() == OUTFIT_SIZE {
                break;
            }
        }
    }

    if selected.len() < OUTFIT_SIZE {
        let mut remaining: Vec<&String> = Vec::new();
        for item in items {
            if !selected.iter().any(|s| s == item) && !remaining.iter().any(|r| *r == item) {
                remaining.push(item);
            }
        }
        remaining.shuffle(rng);
        selected.extend(
            remaining
                .into_iter()
                .take(OUTFIT_SIZE - selected.len())
                .cloned(),
        );
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn all_pairs() -> Vec<(Weather, Event)> {
        let weathers = [Weather::Sunny, Weather::Rainy, Weather::Cold];
        let events = [Event::Casual, Event::Formal, Event::Party];
        weathers
            .iter()
            .flat_map(|w| events.iter().map(move |e| (*w, *e)))
            .collect()
    }

    #[test]
    fn test_tag_table_entries() {
        assert_eq!(
            tags_for(Weather::Rainy, Event::Casual),
            ["hoodie", "raincoat", "boots", "jeans"]
        );
        // The one pair without an entry
        assert!(tags_for(Weather::Rainy, Event::Party).is_empty());
    }

    #[test]
    fn test_empty_closet_empty_outfit() {
        for (weather, event) in all_pairs() {
            let outfit = generate_outfit(&[], weather, event);
            assert!(outfit.is_empty());
        }
    }

    #[test]
    fn test_never_more_than_three_never_duplicates() {
        let items = labels(&[
            "red hoodie",
            "rain boots",
            "blue jeans",
            "raincoat",
            "red hoodie",
            "umbrella hat",
        ]);
        for (weather, event) in all_pairs() {
            let outfit = generate_outfit(&items, weather, event);
            assert!(outfit.len() <= OUTFIT_SIZE);
            for (i, item) in outfit.iter().enumerate() {
                assert!(!outfit[i + 1..].contains(item), "duplicate {:?}", item);
            }
        }
    }

    #[test]
    fn test_ranked_prefix_is_deterministic() {
        let items = labels(&["red hoodie", "blazer", "rain boots"]);
        let outfit = generate_outfit(&items, Weather::Rainy, Event::Casual);

        // "red hoodie" (hoodie) and "rain boots" (boots) score 1, "blazer"
        // scores 0 and lands in the random tail. Equal scores keep
        // first-seen order.
        assert_eq!(outfit.len(), 3);
        assert_eq!(outfit[0], "red hoodie");
        assert_eq!(outfit[1], "rain boots");
        assert_eq!(outfit[2], "blazer");
    }

    #[test]
    fn test_scoring_is_case_insensitive() {
        let items = labels(&["Red HOODIE", "gown"]);
        let outfit = generate_outfit(&items, Weather::Rainy, Event::Casual);
        assert_eq!(outfit[0], "Red HOODIE");
    }

    #[test]
    fn test_multi_tag_labels_rank_higher() {
        // "hoodie with jeans print" matches two tags, plain "jeans" one
        let items = labels(&["jeans", "hoodie with jeans print"]);
        let outfit = generate_outfit(&items, Weather::Rainy, Event::Casual);
        assert_eq!(outfit[0], "hoodie with jeans print");
        assert_eq!(outfit[1], "jeans");
    }

    #[test]
    fn test_fewer_than_three_distinct_returns_all() {
        let items = labels(&["gown", "tuxedo", "gown"]);
        let mut rng = StdRng::seed_from_u64(7);
        let outfit = generate_outfit_with(&items, Weather::Rainy, Event::Party, &mut rng);

        assert_eq!(outfit.len(), 2);
        assert!(outfit.contains(&"gown".to_string()));
        assert!(outfit.contains(&"tuxedo".to_string()));
    }

    #[test]
    fn test_fallback_fills_from_unselected() {
        // Only one item scores; the other two slots come from the
        // zero-score remainder, order randomized.
        let items = labels(&["rain boots", "gown", "tuxedo", "kilt"]);
        let mut rng = StdRng::seed_from_u64(42);
        let outfit = generate_outfit_with(&items, Weather::Rainy, Event::Casual, &mut rng);

        assert_eq!(outfit.len(), 3);
        assert_eq!(outfit[0], "rain boots");
        for item in &outfit[1..] {
            assert!(items.contains(item));
            assert_ne!(item, "rain boots");
        }
    }

    #[test]
    fn test_fallback_path_without_tags() {
        // Rainy + party has no tags: everything goes through the shuffle
        let items = labels(&["gown", "tuxedo", "kilt", "poncho"]);
        let mut rng = StdRng::seed_from_u64(3);
        let outfit = generate_outfit_with(&items, Weather::Rainy, Event::Party, &mut rng);

        assert_eq!(outfit.len(), 3);
        for item in &outfit {
            assert!(items.contains(item));
        }
    }

    #[test]
    fn test_seeded_fallback_is_reproducible() {
        let items = labels(&["gown", "tuxedo", "kilt", "poncho", "cape"]);
        let a = generate_outfit_with(
            &items,
            Weather::Rainy,
            Event::Party,
            &mut StdRng::seed_from_u64(11),
        );
        let b = generate_outfit_with(
            &items,
            Weather::Rainy,
            Event::Party,
            &mut StdRng::seed_from_u64(11),
        );
        assert_eq!(a, b);
    }
}
