use std::{
    convert::Infallible,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::ACCEPT_LANGUAGE, request::Parts},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use crate::{
    cache::TRANSLATIONS_KEY, config::LocaleConfig, error::AppError, routes::AppState,
    session::SESSION_COOKIE,
};

/// Session key holding the visitor's locale.
pub const LOCALE_SESSION_KEY: &str = "locale";

/// Translation file used when the active locale has none.
pub const FALLBACK_LOCALE: &str = "en";

/// Locale chosen for the current request.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveLocale(pub String);

impl Default for ActiveLocale {
    fn default() -> Self {
        Self(FALLBACK_LOCALE.to_owned())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ActiveLocale {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<ActiveLocale>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Raw JSON translation file loaded for the current request. Served as is.
#[derive(Clone, Debug)]
pub struct Translations(pub Arc<String>);

#[derive(Clone, Debug)]
pub struct LocaleResolver {
    default: String,
    available: Vec<String>,
}

impl LocaleResolver {
    pub fn new(config: &LocaleConfig) -> Self {
        Self {
            default: config.default.to_owned(),
            available: config.available.to_owned(),
        }
    }

    /// The configured spelling of `code` when it is an available locale.
    fn available(&self, code: &str) -> Option<&str> {
        self.available
            .iter()
            .find(|locale| locale.eq_ignore_ascii_case(code))
            .map(String::as_str)
    }

    /// Session value first, then the client's `Accept-Language` preferences
    /// (full tag, then primary subtag), then the configured default.
    pub fn resolve(&self, session_locale: Option<&str>, accept_language: Option<&str>) -> String {
        if let Some(locale) = session_locale.and_then(|code| self.available(code)) {
            return locale.to_owned();
        }

        for tag in accept_language.map(preferred_languages).unwrap_or_default() {
            if let Some(locale) = self.available(&tag) {
                return locale.to_owned();
            }

            let primary = tag.split_once('-').map(|(primary, _)| primary);
            if let Some(locale) = primary.and_then(|code| self.available(code)) {
                return locale.to_owned();
            }
        }

        self.default.to_owned()
    }
}

/// Language tags of an `Accept-Language` header, most preferred first.
pub fn preferred_languages(header: &str) -> Vec<String> {
    let mut tags = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();

            if tag.is_empty() || tag == "*" {
                return None;
            }

            let quality = pieces
                .filter_map(|param| param.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);

            (quality > 0.0).then(|| (tag.to_owned(), quality))
        })
        .collect::<Vec<_>>();

    tags.sort_by(|a, b| b.1.total_cmp(&a.1));
    tags.into_iter().map(|(tag, _)| tag).collect()
}

/// `<lang_path>/<locale>.json`, or the fallback locale's file when missing.
pub async fn translation_path(lang_path: &str, locale: &str) -> PathBuf {
    let path = Path::new(lang_path).join(format!("{locale}.json"));

    if tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return path;
    }

    tracing::debug!(locale, "no translation file, using fallback");

    Path::new(lang_path).join(format!("{FALLBACK_LOCALE}.json"))
}

async fn load_translations(path: PathBuf) -> Result<String, AppError> {
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|err| AppError::Internal(format!("reading {}: {err}", path.display())))
}

/// Picks the request locale, stores it in the session and loads the client
/// translations.
pub async fn locale_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    let known = match jar.get(SESSION_COOKIE) {
        Some(cookie) if state.sessions.touch(cookie.value()).await => {
            Some(cookie.value().to_owned())
        }
        _ => None,
    };

    let (jar, session_id) = match known {
        Some(id) => (jar, id),
        None => {
            let id = state.sessions.start().await;
            let cookie = Cookie::build((SESSION_COOKIE, id.to_owned()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax);

            (jar.add(cookie), id)
        }
    };

    let session_locale = state.sessions.get(&session_id, LOCALE_SESSION_KEY).await;
    let accept_language = req
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());

    let locale = state
        .locale
        .resolve(session_locale.as_deref(), accept_language);

    req.extensions_mut().insert(ActiveLocale(locale.to_owned()));
    state
        .sessions
        .put(&session_id, LOCALE_SESSION_KEY, locale.to_owned())
        .await;

    let path = translation_path(&state.config.locale.lang_path, &locale).await;
    let ttl = Duration::from_secs(state.config.locale.cache_ttl_secs);
    let translations = state
        .translations
        .remember(TRANSLATIONS_KEY, ttl, || load_translations(path))
        .await?;

    req.extensions_mut().insert(Translations(translations));

    Ok((jar, next.run(req).await))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> LocaleResolver {
        LocaleResolver {
            default: "en".to_owned(),
            available: vec!["en".to_owned(), "fr".to_owned(), "pt-BR".to_owned()],
        }
    }

    #[test]
    fn parse_accept_language() {
        assert_eq!(
            preferred_languages("fr-CH, fr;q=0.9, en;q=0.8, de;q=0.7, *;q=0.5"),
            vec!["fr-CH", "fr", "en", "de"]
        );
        assert_eq!(
            preferred_languages("en;q=0.2, de, es;q=0"),
            vec!["de", "en"]
        );
        assert!(preferred_languages("").is_empty());
    }

    #[test]
    fn resolve_order() {
        let resolver = resolver();

        assert_eq!(resolver.resolve(Some("fr"), Some("en")), "fr");
        assert_eq!(resolver.resolve(Some("xx"), Some("fr-CA,en")), "fr");
        assert_eq!(resolver.resolve(None, Some("pt-br")), "pt-BR");
        assert_eq!(resolver.resolve(None, Some("de, it")), "en");
        assert_eq!(resolver.resolve(None, None), "en");
    }

    #[tokio::test]
    async fn fallback_translation_path() {
        let dir = temp_dir::TempDir::new().unwrap();
        std::fs::write(dir.child("en.json"), "{}").unwrap();
        std::fs::write(dir.child("fr.json"), "{}").unwrap();
        let lang_path = dir.path().to_str().unwrap();

        assert_eq!(
            translation_path(lang_path, "fr").await,
            dir.child("fr.json")
        );
        assert_eq!(
            translation_path(lang_path, "de").await,
            dir.child("en.json")
        );
    }
}
