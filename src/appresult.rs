use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// One message per violation, sorted so the order is stable.
    #[error("invalid input: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("name already taken")]
    Conflict,

    #[error("not found")]
    NotFound,

    #[error("not the author of this message")]
    Unauthorized,

    /// The acting name is not a live participant.
    #[error("sender is not a participant")]
    UnprocessableSender,

    #[error(transparent)]
    Store(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(messages) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(messages)).into_response()
            }
            AppError::Conflict => StatusCode::CONFLICT.into_response(),
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            AppError::UnprocessableSender => StatusCode::UNPROCESSABLE_ENTITY.into_response(),
            AppError::Store(err) => {
                tracing::error!(error = %err, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("\"{field}\" is invalid"),
                })
            })
            .collect();
        messages.sort();

        Self::Validation(messages)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(vec![rejection.body_text()])
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self::Store(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(sqlx::Error);
