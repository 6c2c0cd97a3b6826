use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::{
    catalog::{self, MovieGenreView},
    entities::movie,
    error::{ServiceError, ServiceResult},
    models::{Movie, MovieQuery},
};

#[async_trait]
pub trait MovieService: Send + Sync {
    async fn get_all(&self) -> ServiceResult<Vec<Movie>>;

    async fn get_by_id(&self, id: i32) -> ServiceResult<Option<Movie>>;

    /// Stores an already validated candidate. Its `id` and `version` are ignored.
    async fn add(&self, candidate: Movie) -> ServiceResult<Movie>;

    /// Replaces the stored record with the same id, provided it still carries
    /// the version the candidate was loaded with.
    ///
    /// Fails with [`ServiceError::NotFound`] when the id is unknown (never
    /// inserts) and with [`ServiceError::Conflict`] when the record was changed
    /// in the meantime. Neither case is retried.
    async fn update(&self, candidate: Movie) -> ServiceResult<Movie>;

    /// Removes the record. Deleting an id that is already gone succeeds.
    async fn delete(&self, id: i32) -> ServiceResult<()>;

    async fn genres(&self) -> ServiceResult<Vec<String>> {
        Ok(catalog::distinct_genres(&self.get_all().await?))
    }

    async fn filter(&self, query: &MovieQuery) -> ServiceResult<MovieGenreView> {
        Ok(catalog::filter(self.get_all().await?, query))
    }
}

#[derive(Clone)]
pub struct SeaOrmMovieService {
    db: DatabaseConnection,
}

impl SeaOrmMovieService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn get_all(&self) -> ServiceResult<Vec<Movie>> {
        let rows = movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;
        rows.into_iter().map(|row| Movie::try_from(row).map_err(ServiceError::from)).collect()
    }

    async fn get_by_id(&self, id: i32) -> ServiceResult<Option<Movie>> {
        let row = movie::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Movie::try_from).transpose()?)
    }

    async fn add(&self, candidate: Movie) -> ServiceResult<Movie> {
        let model = movie::ActiveModel {
            id: NotSet,
            version: Set(0),
            ..active_fields(&candidate)
        };
        let inserted = movie::Entity::insert(model).exec(&self.db).await?;

        let stored = Movie { id: inserted.last_insert_id, version: 0, ..candidate };
        tracing::debug!(id = stored.id, title = %stored.title, "movie created");
        Ok(stored)
    }

    async fn update(&self, candidate: Movie) -> ServiceResult<Movie> {
        let id = candidate.id;
        let next_version = candidate.version.wrapping_add(1);
        let model = movie::ActiveModel {
            id: NotSet,
            version: Set(next_version),
            ..active_fields(&candidate)
        };

        let result = movie::Entity::update_many()
            .set(model)
            .filter(movie::Column::Id.eq(id))
            .filter(movie::Column::Version.eq(candidate.version))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            // Nothing matched id and version: find out which of the two moved.
            return match movie::Entity::find_by_id(id).one(&self.db).await? {
                Some(current) => {
                    tracing::error!(
                        id,
                        loaded_version = candidate.version,
                        current_version = current.version,
                        "update conflict"
                    );
                    Err(ServiceError::Conflict(id))
                }
                None => {
                    tracing::warn!(id, "update of missing movie");
                    Err(ServiceError::NotFound(id))
                }
            };
        }

        tracing::debug!(id, version = next_version, "movie updated");
        Ok(Movie { version: next_version, ..candidate })
    }

    async fn delete(&self, id: i32) -> ServiceResult<()> {
        let result = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            tracing::debug!(id, "delete of missing movie ignored");
        } else {
            tracing::debug!(id, "movie deleted");
        }
        Ok(())
    }
}

fn active_fields(movie: &Movie) -> movie::ActiveModel {
    movie::ActiveModel {
        id: NotSet,
        title: Set(movie.title.clone()),
        release_date: Set(movie.release_date.to_string()),
        genre: Set(movie.genre.clone()),
        price: Set(movie.price.to_string()),
        rating: Set(movie.rating.clone()),
        version: NotSet,
    }
}

impl TryFrom<movie::Model> for Movie {
    type Error = DbErr;

    fn try_from(row: movie::Model) -> Result<Self, Self::Error> {
        let release_date = row
            .release_date
            .parse::<jiff::civil::Date>()
            .map_err(|e| DbErr::Type(format!("movie {}: bad release_date: {e}", row.id)))?;
        let price = row
            .price
            .parse::<Decimal>()
            .map_err(|e| DbErr::Type(format!("movie {}: bad price: {e}", row.id)))?;

        Ok(Movie {
            id: row.id,
            title: row.title,
            release_date,
            genre: row.genre,
            price,
            rating: row.rating,
            version: row.version,
        })
    }
}
