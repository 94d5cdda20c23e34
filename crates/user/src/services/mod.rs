//! Collaborators the lifecycle observer delegates to.
//!
//! Each trait has a small SQLite implementation so the service runs on its
//! own; payment providers, wallets and lists proper live elsewhere.

mod device;
mod list;
mod payment;
mod wallet;

pub use device::*;
pub use list::*;
pub use payment::*;
pub use wallet::*;

use crate::{ListType, Subscription, User};

#[async_trait::async_trait]
pub trait WalletService: Send + Sync {
    async fn create_user_wallet(&self, user: &User) -> creatorhub_shared::Result<()>;
}

#[async_trait::async_trait]
pub trait ListService: Send + Sync {
    async fn create_default_lists(&self, user_id: &str) -> creatorhub_shared::Result<()>;

    async fn add_member(
        &self,
        owner_id: &str,
        member_id: &str,
        list_type: ListType,
    ) -> creatorhub_shared::Result<()>;
}

#[async_trait::async_trait]
pub trait DeviceService: Send + Sync {
    async fn add_user_device(
        &self,
        user_id: &str,
        signature: &str,
        verified: bool,
    ) -> creatorhub_shared::Result<()>;
}

#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    /// `Ok(false)` means the provider refused or the subscription was not cancellable.
    async fn cancel_subscription(&self, subscription: &Subscription) -> anyhow::Result<bool>;
}
