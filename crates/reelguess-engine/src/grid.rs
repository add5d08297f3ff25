use reelguess_types::{Entity, EntityKey, GuessState};
use std::collections::{HashMap, HashSet};

/// Drop entities the grid cannot draw: no poster, or a blank poster path.
pub fn filter_with_posters(entities: Vec<Entity>) -> Vec<Entity> {
    entities
        .into_iter()
        .filter(|entity| {
            entity
                .poster_path()
                .is_some_and(|path| !path.trim().is_empty())
        })
        .collect()
}

/// Drop entities whose answer is already visible (revealed or guessed).
pub fn hide_revealed(entities: Vec<Entity>, states: &HashMap<EntityKey, GuessState>) -> Vec<Entity> {
    entities
        .into_iter()
        .filter(|entity| {
            !states
                .get(&entity.key())
                .is_some_and(GuessState::answer_visible)
        })
        .collect()
}

/// First occurrence of each key wins. Paged endpoints repeat entries when
/// popularity shifts between page requests.
pub fn dedupe_by_key(entities: Vec<Entity>) -> Vec<Entity> {
    let mut seen = HashSet::new();
    entities
        .into_iter()
        .filter(|entity| seen.insert(entity.key()))
        .collect()
}

/// Vote average as `"8.4/10"`. Unrated titles (zero or negative) read "Not rated".
pub fn format_rating(vote_average: f64) -> String {
    if vote_average > 0.0 {
        format!("{:.1}/10", vote_average)
    } else {
        "Not rated".to_string()
    }
}
