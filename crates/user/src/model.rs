use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

#[derive(FromRow, Serialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub avatar: Option<String>,
    pub cover: Option<String>,
    pub referral_code: Option<String>,
    pub created_at: i64,
}

#[derive(Validate, Deserialize, Clone, Debug)]
pub struct CreateUserInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 40))]
    pub username: String,
}

/// Pending changes for an update. `None` leaves the column untouched, the
/// inner `None` of an image field clears it.
#[derive(Validate, Default, Clone, Debug, PartialEq)]
pub struct UserChanges {
    #[validate(length(min = 3, max = 40))]
    pub username: Option<String>,
    pub avatar: Option<Option<String>>,
    pub cover: Option<Option<String>>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.avatar.is_none() && self.cover.is_none()
    }

    pub fn is_dirty_avatar(&self, original: &User) -> bool {
        self.avatar
            .as_ref()
            .is_some_and(|avatar| avatar != &original.avatar)
    }

    pub fn is_dirty_cover(&self, original: &User) -> bool {
        self.cover
            .as_ref()
            .is_some_and(|cover| cover != &original.cover)
    }
}

/// Request-scoped values the lifecycle hooks read or hand back to the caller.
#[derive(Default, Clone, Debug)]
pub struct HookContext {
    pub referral_code: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
    /// Set once the referral cookie has been consumed and must be cleared.
    pub forget_referral: bool,
}

impl HookContext {
    pub fn referral(code: impl Into<String>) -> Self {
        Self {
            referral_code: Some(code.into()),
            ..Default::default()
        }
    }
}

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Deserialize,
    Serialize,
)]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Canceled,
    Expired,
}

#[derive(FromRow, Clone, Debug)]
pub struct Subscription {
    pub id: String,
    pub sender_user_id: String,
    pub recipient_user_id: String,
    pub provider: String,
    pub status: sqlx::types::Text<SubscriptionStatus>,
    pub expires_at: i64,
}

#[derive(
    EnumString, VariantArray, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Deserialize,
)]
pub enum ListType {
    Following,
    Blocked,
}
