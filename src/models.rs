use std::collections::BTreeMap;

use garde::Validate;
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Validate)]
pub struct Movie {
    #[garde(skip)]
    pub id: i32,
    #[garde(length(chars, min = 1, max = 60))]
    pub title: String,
    #[garde(skip)]
    pub release_date: Date,
    #[garde(length(chars, max = 30))]
    pub genre: Option<String>,
    #[garde(custom(non_negative))]
    pub price: Decimal,
    #[garde(length(chars, max = 5))]
    pub rating: Option<String>,
    #[garde(skip)]
    pub version: i32,
}

impl Movie {
    pub fn draft(title: impl Into<String>, release_date: Date, price: Decimal) -> Self {
        Self {
            id: 0,
            title: title.into(),
            release_date,
            genre: None,
            price,
            rating: None,
            version: 0,
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }
}

fn non_negative(value: &Decimal, _ctx: &()) -> garde::Result {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(garde::Error::new("price must not be negative"));
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MovieForm {
    pub id: Option<i32>,
    pub version: Option<i32>,
    pub title: String,
    pub release_date: String,
    pub genre: String,
    pub price: String,
    pub rating: String,
}

impl MovieForm {
    pub fn to_movie(&self, id: i32) -> Result<Movie, FormErrors> {
        let mut errors = FormErrors::default();

        let release_date = match self.release_date.trim() {
            "" => {
                errors.add("release_date", "release date is required");
                None
            }
            raw => match raw.parse::<Date>() {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("release_date", "release date must look like 2010-05-01");
                    None
                }
            },
        };

        let price = match self.price.trim() {
            "" => {
                errors.add("price", "price is required");
                None
            }
            raw => match raw.parse::<Decimal>() {
                Ok(price) => Some(price),
                Err(_) => {
                    errors.add("price", "price must be a number");
                    None
                }
            },
        };

        let candidate = Movie {
            id,
            title: self.title.trim().to_string(),
            release_date: release_date.unwrap_or(jiff::civil::date(1970, 1, 1)),
            genre: optional_text(&self.genre),
            price: price.unwrap_or(Decimal::ZERO),
            rating: optional_text(&self.rating),
            version: self.version.unwrap_or_default(),
        };

        if let Err(report) = candidate.validate() {
            for (path, error) in report.iter() {
                errors.add(path.to_string(), error.to_string());
            }
        }

        if errors.is_empty() { Ok(candidate) } else { Err(errors) }
    }
}

impl From<&Movie> for MovieForm {
    fn from(movie: &Movie) -> Self {
        Self {
            id: Some(movie.id),
            version: Some(movie.version),
            title: movie.title.clone(),
            release_date: movie.release_date.to_string(),
            genre: movie.genre.clone().unwrap_or_default(),
            price: movie.price.to_string(),
            rating: movie.rating.clone().unwrap_or_default(),
        }
    }
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieQuery {
    #[serde(rename = "movieGenre")]
    pub movie_genre: Option<String>,
    #[serde(rename = "searchString")]
    pub search_string: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> MovieForm {
        MovieForm {
            title: "Inception".into(),
            release_date: "2010-05-01".into(),
            genre: "Sci-Fi".into(),
            price: "18.99".into(),
            rating: "PG-13".into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_form_becomes_candidate() {
        let movie = form().to_movie(0).unwrap();
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.release_date, jiff::civil::date(2010, 5, 1));
        assert_eq!(movie.genre.as_deref(), Some("Sci-Fi"));
        assert_eq!(movie.price, Decimal::new(1899, 2));
        assert_eq!(movie.rating.as_deref(), Some("PG-13"));
    }

    #[test]
    fn blank_optional_fields_are_absent() {
        let movie = MovieForm { genre: "  ".into(), rating: String::new(), ..form() }
            .to_movie(0)
            .unwrap();
        assert_eq!(movie.genre, None);
        assert_eq!(movie.rating, None);
    }

    #[test]
    fn zero_price_is_allowed() {
        let movie = MovieForm { price: "0".into(), ..form() }.to_movie(0).unwrap();
        assert!(movie.price.is_zero());
    }

    #[test]
    fn every_broken_field_is_reported() {
        let errors = MovieForm {
            title: "   ".into(),
            release_date: "yesterday".into(),
            price: "-1.50".into(),
            ..form()
        }
        .to_movie(0)
        .unwrap_err();

        assert!(errors.get("title").is_some());
        assert!(errors.get("release_date").is_some());
        assert_eq!(errors.get("price"), Some("price must not be negative"));
        assert_eq!(errors.get("genre"), None);
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let errors = MovieForm::default().to_movie(0).unwrap_err();
        assert!(errors.get("title").is_some());
        assert_eq!(errors.get("release_date"), Some("release date is required"));
        assert_eq!(errors.get("price"), Some("price is required"));
        assert_eq!(errors.get("genre"), None);
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let title = "千".repeat(25);
        let movie = MovieForm { title: title.clone(), genre: "ドラマ".into(), ..form() }
            .to_movie(0)
            .unwrap();
        assert_eq!(movie.title, title);

        let errors = MovieForm { title: "千".repeat(61), ..form() }.to_movie(0).unwrap_err();
        assert!(errors.get("title").is_some());
    }

    #[test]
    fn overlong_rating_is_rejected() {
        let errors = MovieForm { rating: "PG-13-X".into(), ..form() }.to_movie(0).unwrap_err();
        assert!(errors.get("rating").is_some());
    }

    #[test]
    fn form_round_trips_through_edit_view() {
        let movie = form().to_movie(7).unwrap();
        let refilled = MovieForm::from(&movie);
        assert_eq!(refilled.id, Some(7));
        assert_eq!(refilled.to_movie(7).unwrap(), movie);
    }
}
