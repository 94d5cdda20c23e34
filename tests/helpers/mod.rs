#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use creatorhub::{
    AppState,
    config::{Config, DatabaseConfig, LocaleConfig, LoggingConfig, ServerConfig, SessionConfig},
};
use creatorhub_shared::SqliteSettings;
use http_body_util::BodyExt;
use temp_dir::TempDir;
use tower::ServiceExt;

pub const EN_TRANSLATIONS: &str = r#"{"Send": "Send"}"#;
pub const FR_TRANSLATIONS: &str = r#"{"Send": "Envoyer"}"#;

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub settings: SqliteSettings,
    pub dir: TempDir,
}

/// Migrated SQLite file and a lang directory holding the given
/// `(locale, json)` translation files.
pub async fn setup_test_app(lang_files: &[(&str, &str)]) -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let lang_path = dir.child("lang");
    std::fs::create_dir_all(&lang_path)?;

    for (locale, content) in lang_files {
        std::fs::write(lang_path.join(format!("{locale}.json")), content)?;
    }

    let db_path = dir.child("db.sqlite3");
    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: format!("sqlite:{}", db_path.to_str().unwrap()),
            max_connections: 1,
        },
        logging: LoggingConfig {
            level: "debug".to_owned(),
        },
        environment: "test".to_owned(),
        locale: LocaleConfig {
            default: "en".to_owned(),
            available: vec!["en".to_owned(), "fr".to_owned()],
            lang_path: lang_path.to_str().unwrap().to_owned(),
            cache_ttl_secs: 30,
        },
        session: SessionConfig::default(),
    };

    let pool = creatorhub::create_pool(&config.database.url, 1).await?;
    creatorhub::run_migrations(&pool).await?;

    let state = AppState::new(config, pool.clone());

    Ok(TestApp {
        router: creatorhub::router(state.clone()),
        settings: SqliteSettings(pool),
        state,
        dir,
    })
}

pub async fn setup_default_app() -> anyhow::Result<TestApp> {
    setup_test_app(&[("en", EN_TRANSLATIONS), ("fr", FR_TRANSLATIONS)]).await
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> anyhow::Result<Response<Body>> {
        Ok(self.router.clone().oneshot(request).await?)
    }

    pub async fn get(&self, uri: &str, headers: &[(&str, &str)]) -> anyhow::Result<Response<Body>> {
        let mut builder = Request::builder().method("GET").uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        self.send(builder.body(Body::empty())?).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        form: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> anyhow::Result<Response<Body>> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = serde_urlencoded::to_string(form)?;
        self.send(builder.body(Body::from(body))?).await
    }
}

pub async fn json_body(response: Response<Body>) -> anyhow::Result<serde_json::Value> {
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok(serde_json::from_slice(&bytes)?)
}

pub async fn text_body(response: Response<Body>) -> anyhow::Result<String> {
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok(String::from_utf8(bytes.to_vec())?)
}

/// `name=value` pairs of every `Set-Cookie` header.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .map(str::to_owned)
        .collect()
}

pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    set_cookies(response)
        .into_iter()
        .find(|cookie| cookie.starts_with("session_id="))
}
