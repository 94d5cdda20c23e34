use creatorhub_shared::Settings;
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::ValidationError;

pub const DEFAULT_MIN_PRICE: f64 = 1.0;
pub const DEFAULT_MAX_PRICE: f64 = 500.0;

/// Where a pay-per-view price is set. Each context has its own bounds.
#[derive(EnumString, VariantArray, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum PriceContext {
    Message,
    Post,
    Stream,
}

impl PriceContext {
    pub fn min_key(&self) -> String {
        format!("payments.min_ppv_{self}_price")
    }

    pub fn max_key(&self) -> String {
        format!("payments.max_ppv_{self}_price")
    }
}

/// Inclusive price bounds for a [`PriceContext`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PpvPriceRange {
    pub context: PriceContext,
    pub min: f64,
    pub max: f64,
}

impl PpvPriceRange {
    pub fn new(context: PriceContext) -> Self {
        Self {
            context,
            min: DEFAULT_MIN_PRICE,
            max: DEFAULT_MAX_PRICE,
        }
    }

    /// Reads the bounds from settings, unset or unparsable values keep the defaults.
    pub async fn load(
        settings: &dyn Settings,
        context: PriceContext,
    ) -> creatorhub_shared::Result<Self> {
        let mut range = Self::new(context);

        if let Some(min) = settings.number(&context.min_key()).await? {
            range.min = min;
        }

        if let Some(max) = settings.number(&context.max_key()).await? {
            range.max = max;
        }

        Ok(range)
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    /// Checks a raw form value. Anything that does not parse as a number is
    /// out of range.
    pub fn check(&self, value: &str) -> Result<f64, ValidationError> {
        match value.trim().parse::<f64>() {
            Ok(price) if price.is_finite() && self.contains(price) => Ok(price),
            _ => Err(self.error()),
        }
    }

    fn error(&self) -> ValidationError {
        let mut error = ValidationError::new("ppv_min_max");
        error.add_param("min".into(), &self.min);
        error.add_param("max".into(), &self.max);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_keys() {
        assert_eq!(
            PriceContext::Message.min_key(),
            "payments.min_ppv_message_price"
        );
        assert_eq!(PriceContext::Post.max_key(), "payments.max_ppv_post_price");
        assert_eq!(
            PriceContext::Stream.min_key(),
            "payments.min_ppv_stream_price"
        );
    }

    #[test]
    fn check_bounds_inclusive() {
        let range = PpvPriceRange::new(PriceContext::Message);

        assert_eq!(range.check("1"), Ok(1.0));
        assert_eq!(range.check(" 500 "), Ok(500.0));
        assert_eq!(range.check("19.99"), Ok(19.99));
        assert!(range.check("0.99").is_err());
        assert!(range.check("500.01").is_err());
        assert!(range.check("free").is_err());
        assert!(range.check("NaN").is_err());
    }

    #[test]
    fn error_carries_bounds() {
        let range = PpvPriceRange {
            context: PriceContext::Post,
            min: 5.0,
            max: 50.0,
        };

        let err = range.check("100").unwrap_err();
        assert_eq!(err.code, "ppv_min_max");
        assert_eq!(err.params["min"], serde_json::json!(5.0));
        assert_eq!(err.params["max"], serde_json::json!(50.0));
    }
}
