use sqlx::SqlitePool;

use crate::{Subscription, SubscriptionStatus};

/// Cancels subscriptions in the local ledger only. Provider side
/// cancellation (card processors, crypto) is handled by their own gateways.
#[derive(Clone)]
pub struct LocalPaymentGateway(pub SqlitePool);

#[async_trait::async_trait]
impl super::PaymentGateway for LocalPaymentGateway {
    async fn cancel_subscription(&self, subscription: &Subscription) -> anyhow::Result<bool> {
        let canceled = crate::subscription::set_status(
            &self.0,
            &subscription.id,
            SubscriptionStatus::Active,
            SubscriptionStatus::Canceled,
        )
        .await?;

        if canceled {
            tracing::info!(
                subscription_id = %subscription.id,
                provider = %subscription.provider,
                "subscription canceled"
            );
        }

        Ok(canceled)
    }
}
