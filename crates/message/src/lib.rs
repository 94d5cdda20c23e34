mod price;

pub use price::*;

use creatorhub_shared::Settings;
use serde::Deserialize;
use validator::ValidationErrors;

/// Form body of a new paid message. Only the price is validated here, the
/// message content goes through the messenger.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SaveMessageInput {
    #[serde(default)]
    pub price: Option<String>,
}

impl SaveMessageInput {
    pub fn authorize(&self) -> bool {
        true
    }

    /// The submitted price, `None` when absent or blank.
    pub fn raw_price(&self) -> Option<&str> {
        self.price
            .as_deref()
            .map(str::trim)
            .filter(|price| !price.is_empty())
    }

    pub fn validate_range(&self, range: &PpvPriceRange) -> Result<Option<f64>, ValidationErrors> {
        let Some(price) = self.raw_price() else {
            return Ok(None);
        };

        range.check(price).map(Some).map_err(|err| {
            let mut errors = ValidationErrors::new();
            errors.add("price", err);
            errors
        })
    }

    /// Validates against the message bounds and returns the accepted price.
    pub async fn validate_with(
        &self,
        settings: &dyn Settings,
    ) -> creatorhub_shared::Result<Option<f64>> {
        let range = PpvPriceRange::load(settings, PriceContext::Message).await?;
        let price = self.validate_range(&range).inspect_err(|_| {
            tracing::debug!(min = range.min, max = range.max, "message price rejected");
        })?;

        Ok(price)
    }
}
