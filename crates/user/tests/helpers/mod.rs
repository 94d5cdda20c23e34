use std::{
    path::PathBuf,
    str::FromStr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use creatorhub_db::{Migrate, Plan};
use creatorhub_shared::SqliteSettings;
use creatorhub_user::{
    CreateUserInput, HookContext, ListType, Subscription, User, UserObserver, UserRepository,
    UsersObserver,
    services::{DeviceService, ListService, PaymentGateway, WalletService},
};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use tracing_subscriber::{Layer, layer::Context};

pub struct TestState {
    pub pool: SqlitePool,
    pub settings: SqliteSettings,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<TestState> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    creatorhub_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(TestState {
        settings: SqliteSettings(pool.clone()),
        pool,
    })
}

#[allow(dead_code)]
pub fn observer(state: &TestState) -> UsersObserver {
    UsersObserver::new(state.pool.clone(), Arc::new(state.settings.clone()))
}

#[allow(dead_code)]
pub fn repository(state: &TestState, observer: impl UserObserver + 'static) -> UserRepository {
    UserRepository::new(state.pool.clone(), Arc::new(observer))
}

#[allow(dead_code)]
pub async fn create_user(
    repository: &UserRepository,
    name: impl Into<String>,
) -> anyhow::Result<User> {
    let name = name.into();
    let user = repository
        .create(
            CreateUserInput {
                email: format!("{name}@creatorhub.localhost"),
                username: name,
            },
            &mut HookContext::default(),
        )
        .await?;

    Ok(user)
}

#[allow(dead_code)]
#[derive(Default, Clone)]
pub struct RecordingDevices(pub Arc<Mutex<Vec<(String, bool)>>>);

#[async_trait::async_trait]
impl DeviceService for RecordingDevices {
    async fn add_user_device(
        &self,
        user_id: &str,
        _signature: &str,
        verified: bool,
    ) -> creatorhub_shared::Result<()> {
        self.0.lock().unwrap().push((user_id.to_owned(), verified));

        Ok(())
    }
}

#[allow(dead_code)]
pub struct NoopWallets;

#[async_trait::async_trait]
impl WalletService for NoopWallets {
    async fn create_user_wallet(&self, _user: &User) -> creatorhub_shared::Result<()> {
        Ok(())
    }
}

#[allow(dead_code)]
#[derive(Default, Clone)]
pub struct RecordingLists(pub Arc<Mutex<Vec<(String, String, ListType)>>>);

#[async_trait::async_trait]
impl ListService for RecordingLists {
    async fn create_default_lists(&self, _user_id: &str) -> creatorhub_shared::Result<()> {
        Ok(())
    }

    async fn add_member(
        &self,
        owner_id: &str,
        member_id: &str,
        list_type: ListType,
    ) -> creatorhub_shared::Result<()> {
        self.0
            .lock()
            .unwrap()
            .push((owner_id.to_owned(), member_id.to_owned(), list_type));

        Ok(())
    }
}

/// Fails for the given subscription ids, cancels the rest.
#[allow(dead_code)]
pub struct FailingPayments(pub Vec<String>);

#[async_trait::async_trait]
impl PaymentGateway for FailingPayments {
    async fn cancel_subscription(&self, subscription: &Subscription) -> anyhow::Result<bool> {
        if self.0.contains(&subscription.id) {
            anyhow::bail!("provider unavailable");
        }

        Ok(true)
    }
}

#[allow(dead_code)]
pub struct RefusingPayments;

#[async_trait::async_trait]
impl PaymentGateway for RefusingPayments {
    async fn cancel_subscription(&self, _subscription: &Subscription) -> anyhow::Result<bool> {
        Ok(false)
    }
}

/// Counts `ERROR` level events.
#[allow(dead_code)]
#[derive(Default, Clone)]
pub struct ErrorCounter(pub Arc<AtomicUsize>);

impl ErrorCounter {
    #[allow(dead_code)]
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: tracing::Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}
