use std::sync::Arc;

use axum::{
    Router,
    extract::{Form, FromRequestParts, Path, Query, State},
    http::request::Parts,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::de::DeserializeOwned;

use crate::{
    AppState, catalog,
    error::{AppError, AppResult},
    models::{FormErrors, MovieForm, MovieQuery},
    templates,
};

const LISTING: &str = "/movies";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/movies", get(index))
        .route("/movies/details/{id}", get(details))
        .route("/movies/create", get(create_form).post(create))
        .route("/movies/edit/{id}", get(edit_form).post(edit))
        .route("/movies/delete/{id}", get(delete_form).post(delete_confirmed))
        .route("/movies/bygenre/{genre}", get(by_genre))
        .route("/movies/released/{year}", get(released_in_year))
        .route("/movies/released/{year}/{month}", get(released_in_month))
        .with_state(state)
}

// Path segments that do not parse are answered like an unknown route.
pub struct RoutePath<T>(pub T);

impl<S, T> FromRequestParts<S> for RoutePath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(uri = %parts.uri, %rejection, "unmatched path segment");
                Err(AppError::not_found(format!("no page at {}", parts.uri.path())))
            }
        }
    }
}

async fn root() -> Redirect {
    Redirect::to(LISTING)
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MovieQuery>,
) -> AppResult<Html<String>> {
    tracing::debug!(
        search_string = ?query.search_string,
        movie_genre = ?query.movie_genre,
        "listing movies"
    );
    let view = state.movies.filter(&query).await?;
    Ok(Html(templates::index_page(&view)))
}

pub async fn details(
    State(state): State<Arc<AppState>>,
    RoutePath(id): RoutePath<i32>,
) -> AppResult<Html<String>> {
    let movie = find(&state, id).await?;
    Ok(Html(templates::details_page(&movie)))
}

pub async fn create_form() -> Html<String> {
    Html(templates::create_page(&MovieForm::default(), &FormErrors::default()))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Form(form): Form<MovieForm>,
) -> AppResult<Response> {
    let candidate = match form.to_movie(0) {
        Ok(candidate) => candidate,
        Err(errors) => {
            tracing::debug!(?errors, "create rejected by validation");
            return Ok(Html(templates::create_page(&form, &errors)).into_response());
        }
    };

    let movie = state.movies.add(candidate).await?;
    tracing::info!(id = movie.id, title = %movie.title, "movie created");
    Ok(Redirect::to(LISTING).into_response())
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    RoutePath(id): RoutePath<i32>,
) -> AppResult<Html<String>> {
    let movie = find(&state, id).await?;
    Ok(Html(templates::edit_page(id, &MovieForm::from(&movie), &FormErrors::default())))
}

pub async fn edit(
    State(state): State<Arc<AppState>>,
    RoutePath(id): RoutePath<i32>,
    Form(form): Form<MovieForm>,
) -> AppResult<Response> {
    if form.id != Some(id) {
        tracing::warn!(id, form_id = ?form.id, "edit posted for a different movie");
        return Err(AppError::not_found(format!("movie {id} not found")));
    }

    let candidate = match form.to_movie(id) {
        Ok(candidate) => candidate,
        Err(errors) => {
            tracing::debug!(id, ?errors, "edit rejected by validation");
            return Ok(Html(templates::edit_page(id, &form, &errors)).into_response());
        }
    };

    let movie = state.movies.update(candidate).await?;
    tracing::info!(id, version = movie.version, "movie edited");
    Ok(Redirect::to(LISTING).into_response())
}

pub async fn delete_form(
    State(state): State<Arc<AppState>>,
    RoutePath(id): RoutePath<i32>,
) -> AppResult<Html<String>> {
    let movie = find(&state, id).await?;
    Ok(Html(templates::delete_page(&movie)))
}

pub async fn delete_confirmed(
    State(state): State<Arc<AppState>>,
    RoutePath(id): RoutePath<i32>,
) -> AppResult<Redirect> {
    state.movies.delete(id).await?;
    tracing::info!(id, "movie deleted");
    Ok(Redirect::to(LISTING))
}

pub async fn by_genre(
    State(state): State<Arc<AppState>>,
    RoutePath(genre): RoutePath<String>,
) -> AppResult<Html<String>> {
    let view = catalog::by_genre(state.movies.get_all().await?, &genre);
    Ok(Html(templates::index_page(&view)))
}

pub async fn released_in_year(
    State(state): State<Arc<AppState>>,
    RoutePath(year): RoutePath<i32>,
) -> AppResult<Html<String>> {
    released(&state, year, None).await
}

pub async fn released_in_month(
    State(state): State<Arc<AppState>>,
    RoutePath((year, month)): RoutePath<(i32, i32)>,
) -> AppResult<Html<String>> {
    released(&state, year, Some(month)).await
}

async fn released(state: &AppState, year: i32, month: Option<i32>) -> AppResult<Html<String>> {
    let out_of_range = || AppError::not_found("no such release period");

    let year = i16::try_from(year).ok().filter(|y| *y >= 1900).ok_or_else(out_of_range)?;
    let month = match month {
        Some(m) if (1..=12).contains(&m) => Some(m as i8),
        Some(_) => return Err(out_of_range()),
        None => None,
    };

    let view = catalog::released(state.movies.get_all().await?, year, month);
    Ok(Html(templates::index_page(&view)))
}

async fn find(state: &AppState, id: i32) -> AppResult<crate::models::Movie> {
    state.movies.get_by_id(id).await?.ok_or_else(|| {
        tracing::warn!(id, "movie not found");
        AppError::not_found(format!("movie {id} not found"))
    })
}
