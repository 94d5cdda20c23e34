use axum::{
    Form, Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::USER_AGENT},
    response::IntoResponse,
};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use creatorhub_user::{CreateUserInput, HookContext, User, UserChanges};
use serde::Deserialize;

use super::AppState;
use crate::{error::AppError, middleware::ActiveLocale};

/// Cookie set by referral links.
pub const REFERRAL_COOKIE: &str = "referral";

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

fn client_ip(headers: &HeaderMap) -> Option<String> {
    header(headers, "x-forwarded-for")
        .and_then(|value| value.split(',').next().map(|ip| ip.trim().to_owned()))
        .filter(|ip| !ip.is_empty())
        .or_else(|| header(headers, "x-real-ip"))
}

#[derive(Deserialize)]
pub struct CreateForm {
    pub email: String,
    pub username: String,
}

/// POST /users
pub async fn create(
    State(app): State<AppState>,
    locale: ActiveLocale,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<CreateForm>,
) -> Result<(CookieJar, (StatusCode, Json<User>)), AppError> {
    let mut context = HookContext {
        referral_code: jar.get(REFERRAL_COOKIE).map(|c| c.value().to_owned()),
        user_agent: header(&headers, USER_AGENT.as_str()),
        ip: client_ip(&headers),
        forget_referral: false,
    };

    let user = app
        .users
        .create(
            CreateUserInput {
                email: form.email,
                username: form.username,
            },
            &mut context,
        )
        .await
        .map_err(|err| AppError::localized(err, &locale.0))?;

    let jar = if context.forget_referral {
        jar.remove(Cookie::build(REFERRAL_COOKIE).path("/"))
    } else {
        jar
    };

    Ok((jar, (StatusCode::CREATED, Json(user))))
}

/// Absent fields stay untouched, an empty image field clears it.
#[derive(Deserialize)]
pub struct UpdateForm {
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub cover: Option<String>,
}

fn image_change(value: Option<String>) -> Option<Option<String>> {
    value.map(|path| Some(path).filter(|path| !path.trim().is_empty()))
}

/// POST /users/{id}
pub async fn update(
    State(app): State<AppState>,
    locale: ActiveLocale,
    Path((id,)): Path<(String,)>,
    Form(form): Form<UpdateForm>,
) -> Result<Json<User>, AppError> {
    let changes = UserChanges {
        username: form.username,
        avatar: image_change(form.avatar),
        cover: image_change(form.cover),
    };

    let user = app
        .users
        .update(id, changes)
        .await
        .map_err(|err| AppError::localized(err, &locale.0))?;

    Ok(Json(user))
}

/// POST /users/{id}/delete
pub async fn delete(
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, AppError> {
    app.users.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
