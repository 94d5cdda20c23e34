use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    User(String),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Like `From`, with validation failures rendered in `locale`.
    pub fn localized(err: creatorhub_shared::Error, locale: &str) -> Self {
        match err {
            creatorhub_shared::Error::Validate(errors) => {
                Self::Validation(localize_errors(&errors, locale))
            }
            err => err.into(),
        }
    }
}

impl From<creatorhub_shared::Error> for AppError {
    fn from(err: creatorhub_shared::Error) -> Self {
        match err {
            creatorhub_shared::Error::Validate(errors) => Self::Validation(errors.to_string()),
            creatorhub_shared::Error::Forbidden => Self::Forbidden,
            creatorhub_shared::Error::NotFound => Self::NotFound,
            creatorhub_shared::Error::User(msg) => Self::User(msg),
            creatorhub_shared::Error::Server(msg) => Self::Internal(msg),
            creatorhub_shared::Error::Unknown(err) => Self::Internal(format!("{err:#}")),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(format!("{err:#}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let status_code = match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::User(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

/// One sentence per failing rule, translated with the `validation.<code>` keys.
pub fn localize_errors(errors: &ValidationErrors, locale: &str) -> String {
    let mut messages = Vec::new();

    for (field, kind) in errors.errors() {
        let ValidationErrorsKind::Field(field_errors) = kind else {
            continue;
        };

        for error in field_errors {
            let param = |name: &str| {
                error
                    .params
                    .get(name)
                    .map(|value| match value.as_f64() {
                        Some(n) => n.to_string(),
                        None => value.to_string(),
                    })
                    .unwrap_or_default()
            };

            let message = rust_i18n::t!(
                format!("validation.{}", error.code),
                locale = locale,
                attribute = field,
                min = param("min"),
                max = param("max")
            );

            messages.push(message.to_string());
        }
    }

    messages.sort();
    messages.join(" ")
}
