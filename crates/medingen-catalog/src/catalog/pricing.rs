//! Discount schedule and price comparison arithmetic.

use serde::{Deserialize, Serialize};

/// One bracket of a tiered schedule: prices strictly above `above` get `percent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub above: f64,
    pub percent: u8,
}

impl DiscountTier {
    pub const fn new(above: f64, percent: u8) -> Self {
        Self { above, percent }
    }
}

/// How a medicine's discount percent is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DiscountPolicy {
    /// Backend price is shown as-is.
    None,
    /// First tier whose threshold the price exceeds wins; otherwise `base_percent`.
    Tiered {
        tiers: Vec<DiscountTier>,
        base_percent: u8,
    },
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self::tiered()
    }
}

impl DiscountPolicy {
    /// The storefront schedule: >80 ⇒ 20%, >50 ⇒ 15%, >30 ⇒ 10%, else 5%.
    pub fn tiered() -> Self {
        DiscountPolicy::Tiered {
            tiers: vec![
                DiscountTier::new(80.0, 20),
                DiscountTier::new(50.0, 15),
                DiscountTier::new(30.0, 10),
            ],
            base_percent: 5,
        }
    }

    /// Discount percent for a price, capped at 100.
    pub fn discount_for(&self, price: f64) -> u8 {
        let percent = match self {
            DiscountPolicy::None => 0,
            DiscountPolicy::Tiered {
                tiers,
                base_percent,
            } => tiers
                .iter()
                .find(|tier| price > tier.above)
                .map(|tier| tier.percent)
                .unwrap_or(*base_percent),
        };
        percent.min(100)
    }
}

/// Rounds halves toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Price after discount. Equal to `price` when there is no discount,
/// never above it otherwise.
pub fn discounted_price(price: f64, discount: u8) -> f64 {
    if discount == 0 {
        return price;
    }
    let discount = f64::from(discount.min(100));
    round_half_up(price * (1.0 - discount / 100.0)).min(price)
}

/// Signed percent saved by buying `candidate` instead of `reference`.
/// Positive means cheaper. Zero when the reference has no price.
pub fn savings_percent(reference: f64, candidate: f64) -> i64 {
    if reference <= 0.0 {
        return 0;
    }
    round_half_up((reference - candidate) / reference * 100.0) as i64
}

/// How a candidate's price compares to the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceComparison {
    Cheaper,
    Expensive,
    Same,
}

impl PriceComparison {
    pub fn from_savings(savings_percent: i64) -> Self {
        match savings_percent.signum() {
            1 => PriceComparison::Cheaper,
            -1 => PriceComparison::Expensive,
            _ => PriceComparison::Same,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceComparison::Cheaper => "cheaper",
            PriceComparison::Expensive => "expensive",
            PriceComparison::Same => "same",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Discount schedule ===

    #[test]
    fn test_tier_boundaries() {
        let policy = DiscountPolicy::tiered();
        assert_eq!(policy.discount_for(100.0), 20);
        assert_eq!(policy.discount_for(80.0), 15);
        assert_eq!(policy.discount_for(50.5), 15);
        assert_eq!(policy.discount_for(50.0), 10);
        assert_eq!(policy.discount_for(30.0), 5);
        assert_eq!(policy.discount_for(0.0), 5);
    }

    #[test]
    fn test_none_policy() {
        assert_eq!(DiscountPolicy::None.discount_for(500.0), 0);
    }

    #[test]
    fn test_policy_from_config() {
        let policy: DiscountPolicy = serde_json::from_str(r#"{"mode":"none"}"#).unwrap();
        assert_eq!(policy, DiscountPolicy::None);

        let policy: DiscountPolicy = serde_json::from_str(
            r#"{"mode":"tiered","tiers":[{"above":10.0,"percent":50}],"base_percent":0}"#,
        )
        .unwrap();
        assert_eq!(policy.discount_for(11.0), 50);
        assert_eq!(policy.discount_for(10.0), 0);
    }

    // === Discounted price ===

    #[test]
    fn test_discounted_price_rounds() {
        assert_eq!(discounted_price(100.0, 20), 80.0);
        assert_eq!(discounted_price(45.0, 50), 23.0); // 22.5 rounds up
        assert_eq!(discounted_price(12.5, 0), 12.5);
    }

    #[test]
    fn test_discounted_price_never_exceeds_price() {
        for cents in 0..2_000 {
            let price = f64::from(cents) / 10.0;
            for discount in [1u8, 5, 10, 15, 20, 50, 99, 100] {
                let d = discounted_price(price, discount);
                assert!(d <= price, "price {} discount {} gave {}", price, discount, d);
                assert!(d >= 0.0);
            }
        }
    }

    #[test]
    fn test_full_discount_is_free() {
        assert_eq!(discounted_price(80.0, 100), 0.0);
    }

    // === Savings ===

    #[test]
    fn test_savings_percent_sign() {
        assert_eq!(savings_percent(100.0, 80.0), 20);
        assert_eq!(savings_percent(100.0, 125.0), -25);
        assert_eq!(savings_percent(100.0, 100.0), 0);
        assert_eq!(savings_percent(3.0, 2.0), 33);
    }

    #[test]
    fn test_savings_percent_zero_reference() {
        assert_eq!(savings_percent(0.0, 10.0), 0);
    }

    #[test]
    fn test_comparison_follows_savings_sign() {
        assert_eq!(PriceComparison::from_savings(3), PriceComparison::Cheaper);
        assert_eq!(PriceComparison::from_savings(-1), PriceComparison::Expensive);
        assert_eq!(PriceComparison::from_savings(0), PriceComparison::Same);
        assert_eq!(
            serde_json::to_string(&PriceComparison::Cheaper).unwrap(),
            "\"cheaper\""
        );
    }
}
