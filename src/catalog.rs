use crate::models::{Movie, MovieQuery};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovieGenreView {
    pub movies: Vec<Movie>,
    pub genres: Vec<String>,
    pub movie_genre: Option<String>,
    pub search_string: Option<String>,
}

pub fn distinct_genres(movies: &[Movie]) -> Vec<String> {
    let mut genres: Vec<String> = movies.iter().filter_map(|m| m.genre.clone()).collect();
    genres.sort();
    genres.dedup();
    genres
}

// Unicode lowercasing on both sides, no locale rules.
pub fn title_matches(title: &str, needle: &str) -> bool {
    title.to_lowercase().contains(&needle.to_lowercase())
}

pub fn filter(all: Vec<Movie>, query: &MovieQuery) -> MovieGenreView {
    let genres = distinct_genres(&all);
    let search_string = non_empty(query.search_string.as_deref());
    let movie_genre = non_empty(query.movie_genre.as_deref());

    let mut movies = all;
    if let Some(needle) = &search_string {
        movies.retain(|m| title_matches(&m.title, needle));
        tracing::debug!(search_string = %needle, remaining = movies.len(), "applied title filter");
    }
    if let Some(genre) = &movie_genre {
        movies.retain(|m| m.genre.as_deref() == Some(genre.as_str()));
        tracing::debug!(movie_genre = %genre, remaining = movies.len(), "applied genre filter");
    }

    MovieGenreView { movies, genres, movie_genre, search_string }
}

pub fn by_genre(all: Vec<Movie>, genre: &str) -> MovieGenreView {
    let genres = distinct_genres(&all);
    let wanted = genre.to_lowercase();
    let movies = all
        .into_iter()
        .filter(|m| m.genre.as_deref().is_some_and(|g| g.to_lowercase() == wanted))
        .collect();

    MovieGenreView { movies, genres, movie_genre: Some(genre.to_string()), search_string: None }
}

pub fn released(all: Vec<Movie>, year: i16, month: Option<i8>) -> MovieGenreView {
    let genres = distinct_genres(&all);
    let movies = all
        .into_iter()
        .filter(|m| m.release_date.year() == year)
        .filter(|m| month.is_none_or(|month| m.release_date.month() == month))
        .collect();

    MovieGenreView { movies, genres, ..Default::default() }
}

// Blank input means no filter; anything else is used verbatim.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal::Decimal;

    use super::*;

    fn movie(id: i32, title: &str, genre: Option<&str>, released: jiff::civil::Date) -> Movie {
        let mut movie = Movie::draft(title, released, Decimal::new(999, 2));
        movie.id = id;
        movie.genre = genre.map(str::to_string);
        movie
    }

    fn collection() -> Vec<Movie> {
        vec![
            movie(1, "Inception", Some("Sci-Fi"), date(2010, 5, 1)),
            movie(2, "INCEPTION", Some("Drama"), date(2010, 7, 16)),
            movie(3, "Ghostbusters", Some("Comedy"), date(1984, 3, 13)),
            movie(4, "Arrival", Some("Sci-Fi"), date(2016, 11, 11)),
            movie(5, "Untitled", None, date(2010, 5, 20)),
            movie(6, "Sci-fi Night", Some("sci-fi"), date(2001, 1, 1)),
        ]
    }

    fn ids(view: &MovieGenreView) -> Vec<i32> {
        view.movies.iter().map(|m| m.id).collect()
    }

    fn query(genre: Option<&str>, search: Option<&str>) -> MovieQuery {
        MovieQuery {
            movie_genre: genre.map(str::to_string),
            search_string: search.map(str::to_string),
        }
    }

    #[test]
    fn no_filters_keeps_everything() {
        let view = filter(collection(), &MovieQuery::default());
        assert_eq!(ids(&view), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(view.movie_genre, None);
        assert_eq!(view.search_string, None);
    }

    #[test]
    fn empty_inputs_mean_no_filter() {
        let view = filter(collection(), &query(Some(""), Some("  ")));
        assert_eq!(view.movies.len(), 6);
    }

    #[test]
    fn title_search_ignores_case() {
        let view = filter(collection(), &query(None, Some("incep")));
        assert_eq!(ids(&view), vec![1, 2]);
    }

    #[test]
    fn title_search_keeps_surrounding_spaces() {
        let all = vec![
            movie(1, "Star Wars", Some("Sci-Fi"), date(1977, 5, 25)),
            movie(2, "Warsaw", Some("Drama"), date(2020, 1, 1)),
        ];
        let view = filter(all, &query(None, Some(" wars")));
        assert_eq!(ids(&view), vec![1]);
        assert_eq!(view.search_string.as_deref(), Some(" wars"));
    }

    #[test]
    fn title_search_is_not_locale_sensitive() {
        assert!(title_matches("ÉCOLE", "école"));
        assert!(!title_matches("Inception", "inceptions"));
    }

    #[test]
    fn genre_filter_is_exact_and_keeps_full_genre_list() {
        let view = filter(collection(), &query(Some("Sci-Fi"), None));
        assert_eq!(ids(&view), vec![1, 4]);
        assert_eq!(view.genres, vec!["Comedy", "Drama", "Sci-Fi", "sci-fi"]);
        assert_eq!(view.movie_genre.as_deref(), Some("Sci-Fi"));
    }

    #[test]
    fn both_filters_combine() {
        let view = filter(collection(), &query(Some("Drama"), Some("incep")));
        assert_eq!(ids(&view), vec![2]);
    }

    #[test]
    fn distinct_genres_skip_missing_and_duplicates() {
        assert_eq!(distinct_genres(&collection()), vec!["Comedy", "Drama", "Sci-Fi", "sci-fi"]);
        assert!(distinct_genres(&[]).is_empty());
    }

    #[test]
    fn by_genre_ignores_case() {
        let view = by_genre(collection(), "SCI-FI");
        assert_eq!(ids(&view), vec![1, 4, 6]);
        assert_eq!(view.genres.len(), 4);
        assert_eq!(view.movie_genre.as_deref(), Some("SCI-FI"));
    }

    #[test]
    fn released_without_month_matches_whole_year() {
        let view = released(collection(), 2010, None);
        assert_eq!(ids(&view), vec![1, 2, 5]);
    }

    #[test]
    fn released_with_month_narrows() {
        let view = released(collection(), 2010, Some(5));
        assert_eq!(ids(&view), vec![1, 5]);
        assert!(released(collection(), 1999, Some(5)).movies.is_empty());
    }
}
