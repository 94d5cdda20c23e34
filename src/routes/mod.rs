use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use creatorhub_shared::{Settings, SqliteSettings};
use creatorhub_user::{UserRepository, UsersObserver};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::{
    cache::TranslationCache, config::Config, middleware::LocaleResolver,
    session::MemorySessionStore,
};

mod health;
mod messages;
mod translations;
mod users;

pub use messages::SaveMessageRequest;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub settings: Arc<dyn Settings>,
    pub users: UserRepository,
    pub locale: LocaleResolver,
    pub sessions: MemorySessionStore,
    pub translations: TranslationCache,
}

impl AppState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let settings: Arc<dyn Settings> = Arc::new(SqliteSettings(pool.clone()));
        let observer = UsersObserver::new(pool.clone(), settings.clone());

        let session_ttl = Duration::from_secs(config.session.idle_ttl_secs);

        Self {
            locale: LocaleResolver::new(&config.locale),
            users: UserRepository::new(pool.clone(), Arc::new(observer)),
            sessions: MemorySessionStore::new(session_ttl),
            translations: TranslationCache::new(),
            settings,
            config,
            pool,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/translations", get(translations::show))
        .route("/messages", post(messages::store))
        .route("/users", post(users::create))
        .route("/users/{id}", post(users::update))
        .route("/users/{id}/delete", post(users::delete))
        .layer(from_fn_with_state(
            app_state.clone(),
            crate::middleware::locale_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
