use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("movie {0} not found")]
    NotFound(i32),

    #[error("movie {0} was changed by someone else since it was loaded")]
    Conflict(i32),

    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[from] sea_orm::DbErr),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Conflict(String),
    Internal(anyhow::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg) | AppError::Conflict(msg) => f.write_str(msg),
            AppError::Internal(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            ServiceError::Conflict(_) => Self::Conflict(err.to_string()),
            ServiceError::StoreUnavailable(_) => Self::Internal(anyhow::Error::new(err)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::NotFound(msg) => crate::templates::error_page("Not found", msg),
            AppError::Conflict(msg) => crate::templates::error_page("Edit conflict", msg),
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                let message = "Something went wrong. Please try again later.";
                crate::templates::error_page("Error", message)
            }
        };
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_distinct_statuses() {
        assert_eq!(AppError::from(ServiceError::NotFound(3)).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::from(ServiceError::Conflict(3)).status(), StatusCode::CONFLICT);

        let store = ServiceError::StoreUnavailable(sea_orm::DbErr::Custom("gone".into()));
        assert_eq!(AppError::from(store).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
