use axum::{Extension, http::header::CONTENT_TYPE, response::IntoResponse};

use crate::middleware::Translations;

/// GET /translations
pub async fn show(Extension(translations): Extension<Translations>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "application/json")],
        translations.0.as_ref().to_owned(),
    )
}
