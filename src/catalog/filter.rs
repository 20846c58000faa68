use serde::{Deserialize, Serialize};

use crate::models::MovieWithScreenings;

/// Raw search form input, exactly as typed or picked by the user.
///
/// City and language each come from two widgets: a pick from the suggestion
/// list (`selected_*`) and free text (`*_input`). Durations arrive as text
/// and may not be numbers at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    #[serde(rename = "q")]
    pub search_term: String,
    #[serde(rename = "city")]
    pub selected_city: String,
    #[serde(rename = "cityInput")]
    pub city_input: String,
    #[serde(rename = "language")]
    pub selected_language: String,
    #[serde(rename = "languageInput")]
    pub language_input: String,
    #[serde(rename = "minDuration")]
    pub min_duration: String,
    #[serde(rename = "maxDuration")]
    pub max_duration: String,
}

impl SearchForm {
    /// Collapses the form into one value per criterion.
    ///
    /// A selection wins over typed text; an empty field means "no constraint".
    /// Duration bounds that do not parse as integers are dropped.
    #[must_use]
    pub fn resolve(&self) -> FilterCriteria {
        FilterCriteria {
            search_term: non_empty_lowercase(&self.search_term),
            city: non_empty_lowercase(prefer_selected(&self.selected_city, &self.city_input)),
            language: non_empty_lowercase(prefer_selected(
                &self.selected_language,
                &self.language_input,
            )),
            min_duration: parse_bound(&self.min_duration),
            max_duration: parse_bound(&self.max_duration),
        }
    }
}

fn prefer_selected<'a>(selected: &'a str, typed: &'a str) -> &'a str {
    if selected.is_empty() { typed } else { selected }
}

fn non_empty_lowercase(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_lowercase())
}

/// Reads the leading integer (`"130.5"` is 130, `"90min"` is 90). Text with
/// no leading digits is no bound at all.
fn parse_bound(value: &str) -> Option<i32> {
    let value = value.trim_start();
    let sign_len = usize::from(value.starts_with(['-', '+']));
    let end = value[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value.len(), |i| i + sign_len);

    value[..end].parse().ok()
}

/// Resolved filter criteria. Text criteria are stored lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: Option<String>,
    pub city: Option<String>,
    pub language: Option<String>,
    pub min_duration: Option<i32>,
    pub max_duration: Option<i32>,
}

impl FilterCriteria {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when every active criterion accepts the movie.
    #[must_use]
    pub fn matches(&self, entry: &MovieWithScreenings) -> bool {
        self.matches_search(entry)
            && self.matches_city(entry)
            && self.matches_language(entry)
            && self.matches_duration(entry)
    }

    fn matches_search(&self, entry: &MovieWithScreenings) -> bool {
        let Some(term) = &self.search_term else {
            return true;
        };
        let movie = &entry.movie;

        contains_ci(&movie.title, term)
            || contains_ci(&movie.director, term)
            || movie.actors.iter().any(|actor| contains_ci(actor, term))
    }

    fn matches_city(&self, entry: &MovieWithScreenings) -> bool {
        self.city.as_ref().is_none_or(|city| {
            entry
                .screenings
                .iter()
                .any(|screening| contains_ci(&screening.city, city))
        })
    }

    fn matches_language(&self, entry: &MovieWithScreenings) -> bool {
        self.language
            .as_ref()
            .is_none_or(|language| contains_ci(&entry.movie.language, language))
    }

    fn matches_duration(&self, entry: &MovieWithScreenings) -> bool {
        let duration = entry.movie.duration;
        self.min_duration.is_none_or(|min| duration >= min)
            && self.max_duration.is_none_or(|max| duration <= max)
    }
}

// `needle` is already lowercase
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Returns the movies accepted by `criteria`, keeping their relative order.
#[must_use]
pub fn filter_movies(
    movies: &[MovieWithScreenings],
    criteria: &FilterCriteria,
) -> Vec<MovieWithScreenings> {
    movies
        .iter()
        .filter(|entry| criteria.matches(entry))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{dune_and_amelie, movie};

    fn titles(movies: &[MovieWithScreenings]) -> Vec<&str> {
        movies.iter().map(|m| m.movie.title.as_str()).collect()
    }

    fn search(form: SearchForm) -> Vec<MovieWithScreenings> {
        filter_movies(&dune_and_amelie(), &form.resolve())
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let movies = dune_and_amelie();
        let criteria = SearchForm::default().resolve();

        assert!(criteria.is_empty());
        assert_eq!(filter_movies(&movies, &criteria), movies);
    }

    #[test]
    fn test_search_term_matches_title_case_insensitively() {
        let results = search(SearchForm {
            search_term: "dune".to_string(),
            ..Default::default()
        });
        assert_eq!(titles(&results), vec!["Dune"]);
    }

    #[test]
    fn test_search_term_matches_director_and_actors() {
        let by_director = search(SearchForm {
            search_term: "JEUN".to_string(),
            ..Default::default()
        });
        assert_eq!(titles(&by_director), vec!["Amélie"]);

        let by_actor = search(SearchForm {
            search_term: "zendaya".to_string(),
            ..Default::default()
        });
        assert_eq!(titles(&by_actor), vec!["Dune"]);
    }

    #[test]
    fn test_city_filter() {
        let results = search(SearchForm {
            city_input: "lyon".to_string(),
            ..Default::default()
        });
        assert_eq!(titles(&results), vec!["Amélie"]);

        let none = search(SearchForm {
            city_input: "marseille".to_string(),
            ..Default::default()
        });
        assert!(none.is_empty());
    }

    #[test]
    fn test_city_matches_any_screening() {
        let movies = vec![movie("Heat", "Mann", &[], "English", 170, &["Nice", "Lille"])];
        let criteria = SearchForm {
            city_input: "LIL".to_string(),
            ..Default::default()
        }
        .resolve();

        assert_eq!(filter_movies(&movies, &criteria).len(), 1);
    }

    #[test]
    fn test_movie_without_screenings_fails_city_filter() {
        let movies = vec![movie("Heat", "Mann", &[], "English", 170, &[])];
        let criteria = SearchForm {
            city_input: "paris".to_string(),
            ..Default::default()
        }
        .resolve();

        assert!(filter_movies(&movies, &criteria).is_empty());
    }

    #[test]
    fn test_selected_value_wins_over_typed_text() {
        let form = SearchForm {
            selected_city: "Paris".to_string(),
            city_input: "Lyon".to_string(),
            language_input: "fran".to_string(),
            ..Default::default()
        };
        let criteria = form.resolve();
        assert_eq!(criteria.city.as_deref(), Some("paris"));
        assert_eq!(criteria.language.as_deref(), Some("fran"));
    }

    #[test]
    fn test_language_filter() {
        let results = search(SearchForm {
            selected_language: "ENGLISH".to_string(),
            ..Default::default()
        });
        assert_eq!(titles(&results), vec!["Dune"]);
    }

    #[test]
    fn test_duration_bounds_are_inclusive() {
        let movies = vec![
            movie("Short", "A", &[], "English", 89, &["Paris"]),
            movie("Lower", "B", &[], "English", 90, &["Paris"]),
            movie("Upper", "C", &[], "English", 120, &["Paris"]),
            movie("Long", "D", &[], "English", 121, &["Paris"]),
        ];
        let criteria = SearchForm {
            min_duration: "90".to_string(),
            max_duration: "120".to_string(),
            ..Default::default()
        }
        .resolve();

        assert_eq!(titles(&filter_movies(&movies, &criteria)), vec!["Lower", "Upper"]);
    }

    #[test]
    fn test_min_duration_only() {
        let results = search(SearchForm {
            min_duration: "150".to_string(),
            ..Default::default()
        });
        assert_eq!(titles(&results), vec!["Dune"]);
    }

    #[test]
    fn test_non_numeric_duration_is_ignored() {
        let criteria = SearchForm {
            min_duration: "abc".to_string(),
            max_duration: " 130 ".to_string(),
            ..Default::default()
        }
        .resolve();

        assert_eq!(criteria.min_duration, None);
        assert_eq!(criteria.max_duration, Some(130));
        assert_eq!(titles(&filter_movies(&dune_and_amelie(), &criteria)), vec!["Amélie"]);
    }

    #[test]
    fn test_duration_bound_uses_leading_integer() {
        let criteria = SearchForm {
            min_duration: "90min".to_string(),
            max_duration: "130.5".to_string(),
            ..Default::default()
        }
        .resolve();

        assert_eq!(criteria.min_duration, Some(90));
        assert_eq!(criteria.max_duration, Some(130));
        assert_eq!(titles(&filter_movies(&dune_and_amelie(), &criteria)), vec!["Amélie"]);
    }

    #[test]
    fn test_parse_bound_edge_cases() {
        assert_eq!(parse_bound("-5"), Some(-5));
        assert_eq!(parse_bound("+120"), Some(120));
        assert_eq!(parse_bound("-"), None);
        assert_eq!(parse_bound("min90"), None);
        assert_eq!(parse_bound(""), None);
    }

    #[test]
    fn test_criteria_are_combined_with_and() {
        let results = search(SearchForm {
            search_term: "dune".to_string(),
            city_input: "lyon".to_string(),
            ..Default::default()
        });
        assert!(results.is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let movies = vec![
            movie("Zodiac", "Fincher", &[], "English", 157, &["Paris"]),
            movie("Alien", "Scott", &[], "English", 117, &["Paris"]),
            movie("Memento", "Nolan", &[], "English", 113, &["Paris"]),
        ];
        let criteria = SearchForm {
            city_input: "paris".to_string(),
            ..Default::default()
        }
        .resolve();

        assert_eq!(
            titles(&filter_movies(&movies, &criteria)),
            vec!["Zodiac", "Alien", "Memento"]
        );
    }

    #[test]
    fn test_form_deserializes_from_query_names() {
        let form: SearchForm = serde_json::from_value(serde_json::json!({
            "q": "dune",
            "cityInput": "par",
            "maxDuration": "200"
        }))
        .unwrap();

        assert_eq!(form.search_term, "dune");
        assert_eq!(form.city_input, "par");
        assert_eq!(form.max_duration, "200");
        assert!(form.selected_language.is_empty());
    }
}
