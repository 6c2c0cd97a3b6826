use jiff::civil::date;
use rust_decimal::Decimal;

use crate::{error::ServiceResult, models::Movie, service::MovieService};

fn sample_movies() -> Vec<Movie> {
    vec![
        Movie::draft("When Harry Met Sally", date(1989, 2, 12), Decimal::new(799, 2))
            .with_genre("Romantic Comedy")
            .with_rating("R"),
        Movie::draft("Ghostbusters", date(1984, 3, 13), Decimal::new(899, 2))
            .with_genre("Comedy")
            .with_rating("R"),
        Movie::draft("Ghostbusters 2", date(1986, 2, 23), Decimal::new(999, 2))
            .with_genre("Comedy")
            .with_rating("R"),
        Movie::draft("Rio Bravo", date(1959, 4, 15), Decimal::new(399, 2))
            .with_genre("Western")
            .with_rating("R"),
    ]
}

// Returns how many movies were added.
pub async fn seed_if_empty(movies: &dyn MovieService) -> ServiceResult<usize> {
    if !movies.get_all().await?.is_empty() {
        tracing::debug!("catalog not empty, skipping sample data");
        return Ok(0);
    }

    let samples = sample_movies();
    let count = samples.len();
    for movie in samples {
        movies.add(movie).await?;
    }
    tracing::info!(count, "seeded sample movies");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::memory_service;

    #[tokio::test]
    async fn seeds_only_once() {
        let svc = memory_service().await;

        assert_eq!(seed_if_empty(&svc).await.unwrap(), 4);
        assert_eq!(seed_if_empty(&svc).await.unwrap(), 0);

        let all = svc.get_all().await.unwrap();
        assert_eq!(all.len(), 4);
        let genres = svc.genres().await.unwrap();
        assert_eq!(genres, vec!["Comedy", "Romantic Comedy", "Western"]);
    }

    #[test]
    fn samples_pass_validation() {
        use garde::Validate;
        for movie in sample_movies() {
            assert!(movie.validate().is_ok(), "{} should be valid", movie.title);
        }
    }
}
