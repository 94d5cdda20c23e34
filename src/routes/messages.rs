use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use creatorhub_message::SaveMessageInput;
use serde_json::json;

use super::AppState;
use crate::{error::AppError, middleware::ActiveLocale};

/// A new paid message whose price passed the pay-per-view bounds.
#[derive(Debug)]
pub struct SaveMessageRequest {
    pub input: SaveMessageInput,
    pub price: Option<f64>,
}

impl FromRequest<AppState> for SaveMessageRequest {
    type Rejection = Response;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let locale = req
            .extensions()
            .get::<ActiveLocale>()
            .cloned()
            .unwrap_or_default();

        let Form(input) = Form::<SaveMessageInput>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if !input.authorize() {
            return Err(AppError::Forbidden.into_response());
        }

        match input.validate_with(state.settings.as_ref()).await {
            Ok(price) => Ok(Self { input, price }),
            Err(err) => Err(AppError::localized(err, &locale.0).into_response()),
        }
    }
}

/// POST /messages
pub async fn store(request: SaveMessageRequest) -> impl IntoResponse {
    tracing::info!(price = ?request.price, "message accepted");

    Json(json!({ "price": request.price }))
}
