use reelguess_types::Genre;

/// Names of `ids` in order, skipping ids missing from `genres`.
fn genre_names<'a>(ids: &[u64], genres: &'a [Genre]) -> Vec<&'a str> {
    ids.iter()
        .filter_map(|id| genres.iter().find(|genre| genre.id == *id))
        .map(|genre| genre.name.as_str())
        .collect()
}

/// Comma-separated genre label, e.g. `"Action, Science Fiction"`.
pub fn join_genre_names(ids: &[u64], genres: &[Genre]) -> String {
    genre_names(ids, genres).join(", ")
}
