use std::sync::Arc;

use creatorhub_shared::Settings;
use sqlx::SqlitePool;

use crate::{
    FindType, HookContext, ListType, User, UserChanges, referral,
    services::{
        DeviceService, ListService, LocalPaymentGateway, PaymentGateway, SqliteDeviceService,
        SqliteListService, SqliteWalletService, WalletService, device_signature,
    },
};

pub const DEFAULT_2FA_ON_REGISTER: &str = "security.default_2fa_on_register";
pub const DEFAULT_USERS_TO_FOLLOW: &str = "profiles.default_users_to_follow";
pub const REFERRALS_ENABLED: &str = "referrals.enabled";
pub const REFERRALS_AUTO_FOLLOW: &str = "referrals.auto_follow_the_user";

/// Hooks the [`crate::UserRepository`] runs around its writes.
///
/// `created` runs after the insert, `updating` before the update and may
/// rewrite the pending changes, `deleting` before the delete.
#[async_trait::async_trait]
pub trait UserObserver: Send + Sync {
    async fn created(
        &self,
        _user: &User,
        _context: &mut HookContext,
    ) -> creatorhub_shared::Result<()> {
        Ok(())
    }

    async fn updating(
        &self,
        _user: &User,
        _changes: &mut UserChanges,
    ) -> creatorhub_shared::Result<()> {
        Ok(())
    }

    async fn deleting(&self, _user: &User) -> creatorhub_shared::Result<()> {
        Ok(())
    }
}

pub struct NoopObserver;

impl UserObserver for NoopObserver {}

#[derive(Clone)]
pub struct UsersObserver {
    pool: SqlitePool,
    settings: Arc<dyn Settings>,
    wallets: Arc<dyn WalletService>,
    lists: Arc<dyn ListService>,
    devices: Arc<dyn DeviceService>,
    payments: Arc<dyn PaymentGateway>,
}

impl UsersObserver {
    pub fn new(pool: SqlitePool, settings: Arc<dyn Settings>) -> Self {
        Self {
            settings,
            wallets: Arc::new(SqliteWalletService(pool.clone())),
            lists: Arc::new(SqliteListService(pool.clone())),
            devices: Arc::new(SqliteDeviceService(pool.clone())),
            payments: Arc::new(LocalPaymentGateway(pool.clone())),
            pool,
        }
    }

    pub fn wallets(mut self, wallets: Arc<dyn WalletService>) -> Self {
        self.wallets = wallets;
        self
    }

    pub fn lists(mut self, lists: Arc<dyn ListService>) -> Self {
        self.lists = lists;
        self
    }

    pub fn devices(mut self, devices: Arc<dyn DeviceService>) -> Self {
        self.devices = devices;
        self
    }

    pub fn payments(mut self, payments: Arc<dyn PaymentGateway>) -> Self {
        self.payments = payments;
        self
    }

    async fn follow_default_users(&self, user: &User) -> creatorhub_shared::Result<()> {
        let Some(value) = self.settings.get(DEFAULT_USERS_TO_FOLLOW).await? else {
            return Ok(());
        };

        for member_id in value.split(',').map(str::trim).filter(|id| !id.is_empty()) {
            self.lists
                .add_member(&user.id, member_id, ListType::Following)
                .await?;
        }

        Ok(())
    }

    // Lookup then insert is not atomic, two registrations racing on the same
    // code can both insert.
    async fn apply_referral(
        &self,
        user: &User,
        context: &mut HookContext,
    ) -> creatorhub_shared::Result<()> {
        if !self.settings.enabled(REFERRALS_ENABLED).await? {
            return Ok(());
        }

        let Some(code) = context.referral_code.to_owned() else {
            return Ok(());
        };

        let Some(referrer) = crate::find(&self.pool, FindType::ReferralCode(code.to_owned())).await?
        else {
            tracing::debug!(code = %code, "referral code does not match any user");
            return Ok(());
        };

        if referral::exists(&self.pool, &user.id, &code).await? {
            return Ok(());
        }

        referral::create(&self.pool, &user.id, &code).await?;
        context.forget_referral = true;

        tracing::info!(user_id = %user.id, referrer_id = %referrer.id, "referral code used");

        if self.settings.enabled(REFERRALS_AUTO_FOLLOW).await? {
            self.lists
                .add_member(&user.id, &referrer.id, ListType::Following)
                .await?;
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl UserObserver for UsersObserver {
    async fn created(&self, user: &User, context: &mut HookContext) -> creatorhub_shared::Result<()> {
        self.wallets.create_user_wallet(user).await?;
        self.lists.create_default_lists(&user.id).await?;

        if self.settings.enabled(DEFAULT_2FA_ON_REGISTER).await? {
            let signature = device_signature(
                context.user_agent.as_deref().unwrap_or_default(),
                context.ip.as_deref().unwrap_or_default(),
            );
            self.devices
                .add_user_device(&user.id, &signature, true)
                .await?;
        }

        self.follow_default_users(user).await?;
        self.apply_referral(user, context).await?;

        Ok(())
    }

    // The admin panel re-saves image paths under a different prefix, keep the
    // stored one when the file is the same.
    async fn updating(&self, user: &User, changes: &mut UserChanges) -> creatorhub_shared::Result<()> {
        if changes.is_dirty_avatar(user) && same_file(&changes.avatar, &user.avatar) {
            changes.avatar = None;
        }

        if changes.is_dirty_cover(user) && same_file(&changes.cover, &user.cover) {
            changes.cover = None;
        }

        Ok(())
    }

    async fn deleting(&self, user: &User) -> creatorhub_shared::Result<()> {
        let subscriptions = crate::subscription::active_by_sender(&self.pool, &user.id).await?;

        for subscription in subscriptions {
            match self.payments.cancel_subscription(&subscription).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::error!(
                        subscription_id = %subscription.id,
                        "Failed cancelling subscription"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        subscription_id = %subscription.id,
                        error = %err,
                        "Failed cancelling subscription"
                    );
                }
            }
        }

        Ok(())
    }
}

fn same_file(change: &Option<Option<String>>, original: &Option<String>) -> bool {
    let (Some(Some(new)), Some(original)) = (change, original) else {
        return false;
    };

    !original.is_empty() && basename(new) == basename(original)
}

/// Last `/` separated component, ignoring trailing slashes. Empty for `""`
/// and `"/"`, and `"."`/`".."` are kept as is.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');

    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
