use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::MovieWithScreenings;

/// Distinct cities and languages present in a listing, sorted and
/// deduplicated, for the search form's autocomplete lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    pub cities: Vec<String>,
    pub languages: Vec<String>,
}

impl Suggestions {
    #[must_use]
    pub fn from_movies(movies: &[MovieWithScreenings]) -> Self {
        let cities: BTreeSet<&str> = movies
            .iter()
            .flat_map(|entry| entry.screenings.iter().map(|s| s.city.as_str()))
            .collect();

        let languages: BTreeSet<&str> = movies
            .iter()
            .map(|entry| entry.movie.language.as_str())
            .collect();

        Self {
            cities: cities.into_iter().map(str::to_string).collect(),
            languages: languages.into_iter().map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::movie;

    #[test]
    fn test_suggestions_are_sorted_and_unique() {
        let movies = vec![
            movie("A", "X", &[], "English", 100, &["Paris", "Lyon"]),
            movie("B", "Y", &[], "Français", 100, &["Lyon", "Bordeaux"]),
            movie("C", "Z", &[], "English", 100, &[]),
        ];

        let suggestions = Suggestions::from_movies(&movies);

        assert_eq!(suggestions.cities, vec!["Bordeaux", "Lyon", "Paris"]);
        assert_eq!(suggestions.languages, vec!["English", "Français"]);
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(Suggestions::from_movies(&[]), Suggestions::default());
    }
}
